//! Time-window filtering for a reporting run
//!
//! Scopes parsed conversations and transfers to a single calendar month.

pub mod date;

pub use date::{
    DateTimeRange, ReportingMonth, filter_conversations_by_request_started_time,
    filter_transfers_by_date_requested,
};
