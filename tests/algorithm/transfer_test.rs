//! Tests for transfer classification

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use gp2gp_metrics::algorithm::{classify, derive_transfers, filter_for_successful_transfers};
    use gp2gp_metrics::models::{Message, ParsedConversation, TransferStatus};

    use crate::utils::{
        acknowledgement, build_parsed_conversation, build_transfer, december_2019_at, fragment,
        request_completed,
    };

    fn with_completion(ack_error: Option<u32>) -> ParsedConversation {
        let completed = Message {
            time: december_2019_at(30, 18, 3, 21),
            ..request_completed("abc_1")
        };
        let completed_ack = Message {
            time: december_2019_at(31, 8, 41, 48),
            ..acknowledgement("abc_3", "abc_1", ack_error)
        };
        ParsedConversation {
            request_completed: Some(completed),
            request_completed_ack: Some(completed_ack),
            ..build_parsed_conversation()
        }
    }

    #[test]
    fn test_copies_request_details_to_transfer() {
        let conversation = build_parsed_conversation();
        let started = conversation.request_started.clone();

        let transfer = classify(&conversation);

        assert_eq!(transfer.conversation_id, conversation.id);
        assert_eq!(transfer.requesting_practice_asid, started.from_party_asid);
        assert_eq!(transfer.sending_practice_asid, started.to_party_asid);
        assert_eq!(transfer.requesting_supplier, started.from_system);
        assert_eq!(transfer.sending_supplier, started.to_system);
        assert_eq!(transfer.date_requested, started.time);
    }

    #[test]
    fn test_acknowledged_completion_is_integrated() {
        let transfer = classify(&with_completion(None));

        assert_eq!(transfer.status, TransferStatus::Integrated);
        assert_eq!(
            transfer.sla_duration,
            Some(TimeDelta::hours(14) + TimeDelta::minutes(38) + TimeDelta::seconds(27))
        );
        assert_eq!(transfer.date_completed, Some(december_2019_at(31, 8, 41, 48)));
        assert_eq!(transfer.final_error_code, None);
    }

    #[test]
    fn test_suppressed_record_is_integrated() {
        let transfer = classify(&with_completion(Some(15)));

        assert_eq!(transfer.status, TransferStatus::Integrated);
        assert_eq!(transfer.final_error_code, Some(15));
    }

    #[test]
    fn test_rejected_completion_is_failed() {
        let transfer = classify(&with_completion(Some(30)));

        assert_eq!(transfer.status, TransferStatus::Failed);
        assert_eq!(transfer.final_error_code, Some(30));
        assert!(transfer.sla_duration.is_some());
    }

    #[test]
    fn test_intermediate_error_without_completion_ack_is_failed() {
        let conversation = ParsedConversation {
            intermediate_messages: vec![fragment("frag_1", None), fragment("frag_2", Some(29))],
            ..build_parsed_conversation()
        };

        let transfer = classify(&conversation);

        assert_eq!(transfer.status, TransferStatus::Failed);
        assert_eq!(transfer.intermediate_error_codes, vec![29]);
        assert_eq!(transfer.sla_duration, None);
        assert_eq!(transfer.date_completed, None);
    }

    #[test]
    fn test_intermediate_error_does_not_override_successful_ack() {
        let conversation = ParsedConversation {
            intermediate_messages: vec![fragment("frag_1", Some(29))],
            ..with_completion(None)
        };

        let transfer = classify(&conversation);

        assert_eq!(transfer.status, TransferStatus::Integrated);
        assert_eq!(transfer.intermediate_error_codes, vec![29]);
    }

    #[test]
    fn test_unacknowledged_request_is_pending() {
        let conversation = ParsedConversation {
            request_completed: Some(request_completed("abc_1")),
            ..build_parsed_conversation()
        };

        let transfer = classify(&conversation);

        assert_eq!(transfer.status, TransferStatus::Pending);
        assert_eq!(transfer.sla_duration, None);
    }

    #[test]
    fn test_sender_error_without_completion_is_pending_with_error() {
        let conversation = build_parsed_conversation();
        let started_guid = conversation.request_started.guid.clone();
        let conversation = ParsedConversation {
            request_started_ack: Some(acknowledgement("abc_2", &started_guid, Some(10))),
            ..conversation
        };

        let transfer = classify(&conversation);

        assert_eq!(transfer.status, TransferStatus::PendingWithError);
        assert_eq!(transfer.sender_error_code, Some(10));
    }

    #[test]
    fn test_derives_one_transfer_per_conversation_in_order() {
        let conversations = vec![
            build_parsed_conversation(),
            with_completion(None),
            build_parsed_conversation(),
        ];

        for parallel in [false, true] {
            let transfers = derive_transfers(&conversations, parallel);
            let ids: Vec<&str> = transfers.iter().map(|t| t.conversation_id.as_str()).collect();
            let expected: Vec<&str> = conversations.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_successful_transfers_need_integration_and_duration() {
        let transfers = vec![
            crate::utils::an_integrated_transfer("A", TimeDelta::hours(1)),
            gp2gp_metrics::models::Transfer {
                status: TransferStatus::Integrated,
                sla_duration: None,
                ..build_transfer()
            },
            build_transfer(),
        ];

        let successful: Vec<_> = filter_for_successful_transfers(&transfers).collect();

        assert_eq!(successful.len(), 1);
        assert_eq!(successful[0].requesting_practice_asid, "A");
    }
}
