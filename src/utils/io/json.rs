//! JSON output for dashboard records

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::util::safe_create_file;
use crate::error::{MetricsError, Result};
use crate::utils::logging::log_operation_complete;

/// Serialise a record as JSON into the given file
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = safe_create_file(path, "dashboard output")?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(|e| MetricsError::io(path, e))?;

    log_operation_complete("wrote", path, 1, None);
    Ok(())
}
