//! Transfer reconstruction and metrics algorithms
//!
//! Leaves first: SLA banding, conversation parsing, transfer classification,
//! then the practice and national aggregations built on top of them.

pub mod conversation;
pub mod national_metrics;
pub mod practice_metrics;
pub mod sla;
pub mod transfer;

pub use conversation::{
    ConversationParser, ParsedConversations, group_into_conversations, parse, parse_conversation,
    parse_conversations,
};
pub use national_metrics::{NationalMetrics, aggregate_national, calculate_national_metrics};
pub use practice_metrics::{PracticeMetrics, PracticeMetricsOutcome, aggregate_practice};
pub use sla::{SlaBand, SlaCounter, band_of};
pub use transfer::{classify, derive_transfers, filter_for_successful_transfers};
