//! Tests for conversation grouping and role binding

#[cfg(test)]
mod tests {
    use gp2gp_metrics::algorithm::{group_into_conversations, parse, parse_conversations};
    use gp2gp_metrics::models::{Conversation, Message};
    use gp2gp_metrics::MetricsError;

    use crate::utils::{
        acknowledgement, build_message, fragment, request_completed, request_started,
    };

    fn message_in(conversation_id: &str) -> Message {
        Message {
            conversation_id: conversation_id.to_string(),
            ..build_message()
        }
    }

    #[test]
    fn test_groups_messages_by_conversation_in_first_appearance_order() {
        let messages = vec![
            message_in("b"),
            message_in("a"),
            message_in("b"),
            message_in("c"),
            message_in("a"),
        ];
        let guids: Vec<String> = messages.iter().map(|m| m.guid.clone()).collect();

        let conversations = group_into_conversations(messages);

        let ids: Vec<&str> = conversations.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let b_guids: Vec<&str> = conversations[0]
            .messages
            .iter()
            .map(|m| m.guid.as_str())
            .collect();
        assert_eq!(b_guids, vec![guids[0].as_str(), guids[2].as_str()]);
        assert_eq!(conversations[1].messages.len(), 2);
        assert_eq!(conversations[2].messages.len(), 1);
    }

    #[test]
    fn test_binds_every_role_of_a_complete_conversation() {
        let started = request_started("abc");
        let completed = request_completed("abc_1");
        let started_ack = acknowledgement("abc_2", "abc", None);
        let completed_ack = acknowledgement("abc_3", "abc_1", None);

        let parsed = parse(vec![
            started.clone(),
            completed.clone(),
            started_ack.clone(),
            completed_ack.clone(),
        ])
        .unwrap();

        assert_eq!(parsed.id, started.conversation_id);
        assert_eq!(parsed.request_started, started);
        assert_eq!(parsed.request_completed, Some(completed));
        assert_eq!(parsed.request_started_ack, Some(started_ack));
        assert_eq!(parsed.request_completed_ack, Some(completed_ack));
        assert!(parsed.intermediate_messages.is_empty());
    }

    #[test]
    fn test_fragments_and_their_acks_are_intermediate() {
        let first_fragment = fragment("frag_1", None);
        let fragment_ack = acknowledgement("frag_ack", "frag_1", None);
        let second_fragment = fragment("frag_2", Some(29));

        let parsed = parse(vec![
            request_started("abc"),
            acknowledgement("abc_ack", "abc", None),
            request_completed("abc_1"),
            first_fragment.clone(),
            fragment_ack.clone(),
            second_fragment.clone(),
        ])
        .unwrap();

        assert_eq!(
            parsed.intermediate_messages,
            vec![first_fragment, fragment_ack, second_fragment]
        );
        assert!(parsed.request_completed_ack.is_none());
    }

    #[test]
    fn test_ack_arriving_before_its_completion_is_intermediate() {
        let early_ack = acknowledgement("abc_2", "abc_1", None);

        let parsed = parse(vec![
            request_started("abc"),
            early_ack.clone(),
            request_completed("abc_1"),
        ])
        .unwrap();

        assert_eq!(parsed.intermediate_messages, vec![early_ack]);
        assert!(parsed.request_completed_ack.is_none());
    }

    #[test]
    fn test_ack_of_unknown_message_is_intermediate() {
        let stray_ack = acknowledgement("abc_2", "not-in-conversation", Some(12));

        let parsed = parse(vec![request_started("abc"), stray_ack.clone()]).unwrap();

        assert_eq!(parsed.intermediate_messages, vec![stray_ack]);
        assert!(parsed.request_started_ack.is_none());
    }

    #[test]
    fn test_later_completion_replaces_earlier_one() {
        let first = request_completed("abc_1");
        let second = request_completed("abc_2");
        let ack_of_first = acknowledgement("abc_3", "abc_1", None);

        let parsed = parse(vec![
            request_started("abc"),
            first,
            second.clone(),
            ack_of_first.clone(),
        ])
        .unwrap();

        assert_eq!(parsed.request_completed, Some(second));
        // Acks are matched against the bound completion only
        assert!(parsed.request_completed_ack.is_none());
        assert_eq!(parsed.intermediate_messages, vec![ack_of_first]);
    }

    #[test]
    fn test_completion_ack_takes_precedence_over_start_ack() {
        let started = request_started("abc");
        let completed = request_completed("abc_1");
        let completed_ack = acknowledgement("abc_2", "abc_1", Some(30));

        let parsed = parse(vec![started, completed, completed_ack.clone()]).unwrap();

        assert_eq!(parsed.request_completed_ack, Some(completed_ack));
        assert!(parsed.request_started_ack.is_none());
    }

    #[test]
    fn test_conversation_not_starting_with_request_is_rejected() {
        let result = parse(vec![request_completed("abc_1"), request_started("abc")]);

        assert!(matches!(
            result,
            Err(MetricsError::ConversationMissingStart { .. })
        ));
    }

    #[test]
    fn test_empty_conversation_is_rejected() {
        let result = parse(Vec::new());

        assert!(matches!(result, Err(MetricsError::EmptyConversation { .. })));
    }

    #[test]
    fn test_invalid_conversations_are_dropped_not_fatal() {
        let valid = Conversation::new("valid".to_string(), vec![request_started("abc")]);
        let invalid = Conversation::new("invalid".to_string(), vec![request_completed("abc_1")]);

        for parallel in [false, true] {
            let outcome = parse_conversations(vec![valid.clone(), invalid.clone()], parallel);

            assert_eq!(outcome.parsed.len(), 1);
            assert_eq!(outcome.parsed[0].id, "valid");
            assert_eq!(outcome.dropped, vec!["invalid".to_string()]);
            assert_eq!(outcome.dropped_count(), 1);
        }
    }
}
