//! Progress reporting utilities for long-running operations
//!
//! Progress bars for reading extracts and parsing conversations, using the
//! indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Default style for a main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Default style for a spinner
pub const DEFAULT_SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Create a main progress bar with a standardized style
///
/// # Arguments
/// * `length` - Total length for the progress bar
/// * `description` - Optional description to display as the initial message
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_MAIN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Create a spinner progress bar for operations without a known length
///
/// # Arguments
/// * `message` - Optional message to display with the spinner
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(DEFAULT_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
