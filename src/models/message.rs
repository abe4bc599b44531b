//! Spine message model
//!
//! A `Message` is one event logged by the spine for a GP2GP conversation.
//! Messages are immutable once constructed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interaction id of the EHR request that opens a conversation
pub const EHR_REQUEST_STARTED: &str = "urn:nhs:names:services:gp2gp/RCMR_IN010000UK05";
/// Interaction id of the message marking the sender's completion of the transfer
pub const EHR_REQUEST_COMPLETED: &str = "urn:nhs:names:services:gp2gp/RCMR_IN030000UK06";
/// Interaction id of an application acknowledgement
pub const APPLICATION_ACK: &str = "urn:nhs:names:services:gp2gp/MCCI_IN010000UK13";
/// Interaction id of a large-message fragment
pub const COMMON_POINT_TO_POINT: &str = "urn:nhs:names:services:gp2gp/COPC_IN000001UK01";

/// Known GP2GP wire interactions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interaction {
    /// EHR request (`RCMR_IN010000UK05`)
    EhrRequestStarted,
    /// EHR extract sent, request completed (`RCMR_IN030000UK06`)
    EhrRequestCompleted,
    /// Application acknowledgement (`MCCI_IN010000UK13`)
    ApplicationAck,
    /// Common point-to-point fragment (`COPC_IN000001UK01`)
    CommonPointToPoint,
    /// Any other interaction id, kept verbatim
    Other(String),
}

impl Interaction {
    /// The interaction id as it appears on the wire
    #[must_use]
    pub fn as_urn(&self) -> &str {
        match self {
            Self::EhrRequestStarted => EHR_REQUEST_STARTED,
            Self::EhrRequestCompleted => EHR_REQUEST_COMPLETED,
            Self::ApplicationAck => APPLICATION_ACK,
            Self::CommonPointToPoint => COMMON_POINT_TO_POINT,
            Self::Other(urn) => urn,
        }
    }
}

impl From<&str> for Interaction {
    fn from(s: &str) -> Self {
        match s.trim() {
            EHR_REQUEST_STARTED => Self::EhrRequestStarted,
            EHR_REQUEST_COMPLETED => Self::EhrRequestCompleted,
            APPLICATION_ACK => Self::ApplicationAck,
            COMMON_POINT_TO_POINT => Self::CommonPointToPoint,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_urn())
    }
}

/// One transmitted spine event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the spine logged the message
    pub time: DateTime<Utc>,
    /// Identifier shared by every message of a transfer attempt
    pub conversation_id: String,
    /// Globally unique id of this message
    pub guid: String,
    /// Wire interaction
    pub interaction: Interaction,
    /// ASID of the sending system
    pub from_party_asid: String,
    /// ASID of the receiving system
    pub to_party_asid: String,
    /// GUID of the message this one refers to (acknowledgements)
    pub message_ref: Option<String>,
    /// Error code reported with the message
    pub error_code: Option<u32>,
    /// Supplier label of the sending system
    pub from_system: Option<String>,
    /// Supplier label of the receiving system
    pub to_system: Option<String>,
}

impl Message {
    /// Whether this message is an application acknowledgement of `other`
    #[must_use]
    pub fn acknowledges(&self, other: &Message) -> bool {
        self.interaction == Interaction::ApplicationAck
            && self.message_ref.as_deref() == Some(other.guid.as_str())
    }
}
