//! Error handling for the metrics pipeline.

use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors raised while reconstructing transfers or producing metrics
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The first message of a conversation is not an EHR request
    #[error("Conversation {conversation_id} does not start with an EHR request")]
    ConversationMissingStart { conversation_id: String },

    /// A conversation was handed to the parser with no messages in it
    #[error("Conversation {conversation_id} has no messages")]
    EmptyConversation { conversation_id: String },

    /// Year/month pair that does not name a calendar month
    #[error("Invalid reporting month: {year}-{month}")]
    InvalidReportingMonth { year: i32, month: u32 },

    /// A spine row that cannot be turned into a message
    #[error("Invalid spine record: {0}")]
    InvalidRecord(String),

    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error with the path that was being accessed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
}

impl MetricsError {
    /// Wrap an IO error together with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Conversation the error belongs to, for structural errors
    #[must_use]
    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            Self::ConversationMissingStart { conversation_id }
            | Self::EmptyConversation { conversation_id } => Some(conversation_id),
            _ => None,
        }
    }

    /// Whether the error only affects a single conversation
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ConversationMissingStart { .. } | Self::EmptyConversation { .. }
        )
    }
}

/// Result type for metrics operations
pub type Result<T> = std::result::Result<T, MetricsError>;
