//! Utility functions for error handling
//!
//! File helpers that attach the offending path and the reason the file was
//! needed to any IO failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{MetricsError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(MetricsError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("file needed for {purpose} not found")),
        ));
    }

    if !path.is_file() {
        return Err(MetricsError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected a file for {purpose}"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions".to_string(),
            _ => format!("failed to open file for {purpose}: {e}"),
        };
        MetricsError::io(path, io::Error::new(e.kind(), message))
    })
}

/// Safely create (or truncate) a file for writing, creating parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MetricsError::io(parent, e))?;
    }

    fs::File::create(path).map_err(|e| {
        MetricsError::io(
            path,
            io::Error::new(e.kind(), format!("failed to create file for {purpose}: {e}")),
        )
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::InvalidData => {
                "file contains invalid UTF-8 data - cannot read as text".to_string()
            }
            _ => format!("failed to read file content for {purpose}"),
        };
        MetricsError::io(path, io::Error::new(e.kind(), message))
    })?;

    Ok(content)
}
