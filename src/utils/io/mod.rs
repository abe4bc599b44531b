//! IO utilities for file operations
//!
//! Readers for the spine extracts and the organisation list, and writers for
//! the dashboard JSON files and the transfers Parquet table.

pub mod json;
pub mod organisation;
pub mod parquet;
pub mod spine;

// Re-export commonly used functions for convenience
pub use json::write_json_file;
pub use organisation::{parse_practice_directory, read_practice_directory};
pub use self::parquet::{
    convert_transfers_to_record_batch, transfer_schema, write_transfers_parquet,
};
pub use spine::{
    SpineItem, construct_messages_from_spine_items, read_spine_csv, read_spine_csv_file,
    read_spine_csv_files,
};
