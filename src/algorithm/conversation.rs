//! Conversation reconstruction
//!
//! Groups spine messages by conversation id and binds every message of a
//! conversation to its role in a single forward pass.
//!
//! Binding rules, checked in this order for every message after the first:
//! 1. an EHR request completed message becomes `request_completed` (a later
//!    one replaces an earlier one);
//! 2. an acknowledgement of the bound `request_completed` becomes
//!    `request_completed_ack`;
//! 3. an acknowledgement of the `request_started` becomes
//!    `request_started_ack`;
//! 4. anything else is an intermediate message.
//!
//! Acknowledgements are only matched against messages already seen, never
//! retroactively.

use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{MetricsError, Result};
use crate::models::{Conversation, Interaction, Message, ParsedConversation};

/// Group messages by conversation id
///
/// Conversations come out in order of first appearance; messages keep their
/// arrival order within each conversation.
#[must_use]
pub fn group_into_conversations(messages: impl IntoIterator<Item = Message>) -> Vec<Conversation> {
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();
    let mut conversations: Vec<Conversation> = Vec::new();

    for message in messages {
        match positions.get(&message.conversation_id) {
            Some(&idx) => conversations[idx].messages.push(message),
            None => {
                positions.insert(message.conversation_id.clone(), conversations.len());
                conversations.push(Conversation::new(message.conversation_id.clone(), vec![message]));
            }
        }
    }

    conversations
}

/// Single-pass role binder for one conversation
#[derive(Debug)]
pub struct ConversationParser {
    id: String,
    messages: Vec<Message>,
    request_completed: Option<Message>,
    request_started_ack: Option<Message>,
    request_completed_ack: Option<Message>,
    intermediate_messages: Vec<Message>,
}

impl ConversationParser {
    /// Prepare a parser over the conversation's messages
    #[must_use]
    pub fn new(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            messages: conversation.messages,
            request_completed: None,
            request_started_ack: None,
            request_completed_ack: None,
            intermediate_messages: Vec::new(),
        }
    }

    /// Consume the messages and build the parsed conversation
    ///
    /// # Errors
    /// Returns `ConversationMissingStart` if the first message is not an EHR
    /// request, and `EmptyConversation` if there are no messages at all.
    pub fn parse(mut self) -> Result<ParsedConversation> {
        let mut messages = std::mem::take(&mut self.messages).into_iter();
        let request_started = match messages.next() {
            Some(message) if message.interaction == Interaction::EhrRequestStarted => message,
            Some(_) => {
                return Err(MetricsError::ConversationMissingStart {
                    conversation_id: self.id,
                });
            }
            None => {
                return Err(MetricsError::EmptyConversation {
                    conversation_id: self.id,
                });
            }
        };

        for message in messages {
            self.process_message(&request_started, message);
        }

        Ok(ParsedConversation {
            id: self.id,
            request_started,
            request_started_ack: self.request_started_ack,
            request_completed: self.request_completed,
            intermediate_messages: self.intermediate_messages,
            request_completed_ack: self.request_completed_ack,
        })
    }

    fn process_message(&mut self, request_started: &Message, message: Message) {
        if message.interaction == Interaction::EhrRequestCompleted {
            self.request_completed = Some(message);
        } else if self
            .request_completed
            .as_ref()
            .is_some_and(|completed| message.acknowledges(completed))
        {
            self.request_completed_ack = Some(message);
        } else if message.acknowledges(request_started) {
            self.request_started_ack = Some(message);
        } else {
            self.intermediate_messages.push(message);
        }
    }
}

/// Parse one conversation
pub fn parse_conversation(conversation: Conversation) -> Result<ParsedConversation> {
    ConversationParser::new(conversation).parse()
}

/// Parse an ordered message list belonging to a single conversation
///
/// The conversation id is taken from the first message.
pub fn parse(messages: Vec<Message>) -> Result<ParsedConversation> {
    let id = messages
        .first()
        .map(|message| message.conversation_id.clone())
        .unwrap_or_default();
    parse_conversation(Conversation::new(id, messages))
}

/// Conversations that parsed, and the ids of those that did not
#[derive(Debug, Clone, Default)]
pub struct ParsedConversations {
    /// Successfully parsed conversations, in input order
    pub parsed: Vec<ParsedConversation>,
    /// Ids of conversations dropped for structural errors
    pub dropped: Vec<String>,
}

impl ParsedConversations {
    /// Number of conversations dropped
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Parse many conversations, dropping the structurally invalid ones
///
/// # Arguments
/// * `conversations` - Grouped conversations
/// * `parallel` - Parse on the rayon pool; output order is unchanged
#[must_use]
pub fn parse_conversations(conversations: Vec<Conversation>, parallel: bool) -> ParsedConversations {
    let results: Vec<Result<ParsedConversation>> = if parallel {
        conversations.into_par_iter().map(parse_conversation).collect()
    } else {
        conversations.into_iter().map(parse_conversation).collect()
    };

    let mut outcome = ParsedConversations::default();
    for result in results {
        match result {
            Ok(parsed) => outcome.parsed.push(parsed),
            Err(error) => {
                debug_assert!(error.is_structural());
                debug!("Dropping conversation: {error}");
                outcome
                    .dropped
                    .push(error.conversation_id().unwrap_or_default().to_string());
            }
        }
    }

    outcome
}
