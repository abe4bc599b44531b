//! Conversation models
//!
//! A `Conversation` is the raw, arrival-ordered list of messages for one
//! transfer attempt. A `ParsedConversation` assigns every one of those
//! messages to exactly one role.

use serde::Serialize;

use crate::models::message::Message;

/// All messages sharing a conversation id, in log order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// Conversation id
    pub id: String,
    /// Messages in arrival order
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create a new conversation
    #[must_use]
    pub fn new(id: String, messages: Vec<Message>) -> Self {
        Self { id, messages }
    }
}

/// A conversation with each message bound to its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedConversation {
    /// Conversation id
    pub id: String,
    /// The EHR request that opened the conversation
    pub request_started: Message,
    /// Acknowledgement of the EHR request
    pub request_started_ack: Option<Message>,
    /// The sender's completion message
    pub request_completed: Option<Message>,
    /// Every message not bound to another role, in arrival order
    pub intermediate_messages: Vec<Message>,
    /// Acknowledgement of the completion message
    pub request_completed_ack: Option<Message>,
}
