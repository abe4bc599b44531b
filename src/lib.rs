//! A Rust library for reconstructing GP2GP record transfers from spine
//! messages and calculating practice-level and national monthly metrics.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::PipelineConfig;
pub use error::{MetricsError, Result};
pub use models::{
    Conversation, Interaction, Message, ParsedConversation, PracticeDetails, PracticeLookup,
    Transfer, TransferStatus,
};

// Reconstruction and aggregation
pub use algorithm::{
    SlaBand, aggregate_national, aggregate_practice, band_of, classify, parse, parse_conversation,
};
pub use filter::{DateTimeRange, ReportingMonth};

// Pipeline entry points
pub use pipeline::{
    calculate_national_metrics_data, calculate_practice_metrics_data,
    parse_transfers_from_messages, run,
};
