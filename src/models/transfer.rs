//! Transfer model
//!
//! A `Transfer` is the classified outcome of one parsed conversation and the
//! unit every metric is computed from.

use chrono::{DateTime, TimeDelta, Utc};

/// Error code an acknowledgement carries when the receiving practice chose to
/// suppress the record; the transfer still counts as integrated.
pub const ERROR_SUPPRESSED: u32 = 15;

/// Completion status of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStatus {
    /// Completion was acknowledged without error
    Integrated,
    /// Completion was rejected, or the conversation errored before completing
    Failed,
    /// Not yet completed
    Pending,
    /// Not yet completed, but the sending side reported an error
    PendingWithError,
}

impl TransferStatus {
    /// Upper-case label used in tabular output
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integrated => "INTEGRATED",
            Self::Failed => "FAILED",
            Self::Pending => "PENDING",
            Self::PendingWithError => "PENDING_WITH_ERROR",
        }
    }

    /// Whether the status falls in the combined pending group
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending | Self::PendingWithError)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one record-transfer attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Conversation id the transfer was derived from
    pub conversation_id: String,
    /// Time between the completion message and its acknowledgement
    pub sla_duration: Option<TimeDelta>,
    /// ASID of the practice that requested the record
    pub requesting_practice_asid: String,
    /// ASID of the practice that holds the record
    pub sending_practice_asid: String,
    /// Supplier system of the requesting practice
    pub requesting_supplier: Option<String>,
    /// Supplier system of the sending practice
    pub sending_supplier: Option<String>,
    /// Derived status
    pub status: TransferStatus,
    /// When the record was requested
    pub date_requested: DateTime<Utc>,
    /// When the completion was acknowledged
    pub date_completed: Option<DateTime<Utc>>,
    /// Error reported when acknowledging the request
    pub sender_error_code: Option<u32>,
    /// Error reported when acknowledging the completion
    pub final_error_code: Option<u32>,
    /// Errors carried by intermediate messages, in encounter order
    pub intermediate_error_codes: Vec<u32>,
}

impl Transfer {
    /// Integrated with a measurable SLA duration
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.status == TransferStatus::Integrated && self.sla_duration.is_some()
    }
}
