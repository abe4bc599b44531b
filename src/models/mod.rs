//! Domain models for GP2GP transfer reporting
//!
//! Messages come in from the spine, are grouped into conversations, parsed,
//! and classified into transfers. Practices are looked up from the
//! organisation directory.

pub mod conversation;
pub mod message;
pub mod practice;
pub mod transfer;

// Re-export commonly used types
pub use conversation::{Conversation, ParsedConversation};
pub use message::{Interaction, Message};
pub use practice::{PracticeDetails, PracticeDirectory, PracticeLookup};
pub use transfer::{ERROR_SUPPRESSED, Transfer, TransferStatus};
