//! Organisation list reading

use std::path::Path;

use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::models::PracticeDirectory;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Parse an organisation list from its JSON text
pub fn parse_practice_directory(json: &str) -> Result<PracticeDirectory> {
    Ok(serde_json::from_str(json)?)
}

/// Read the organisation list produced by the registry export
pub fn read_practice_directory(path: &Path) -> Result<PracticeDirectory> {
    log_operation_start("Reading organisation list from", path);

    let content = safe_read_to_string(path, "organisation list")?;
    let directory = parse_practice_directory(&content)?;

    log_operation_complete("read", path, directory.practices.len(), None);
    Ok(directory)
}
