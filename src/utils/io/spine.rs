//! Spine log extract reading
//!
//! Extracts are CSV files, optionally gzip-compressed, with one row per
//! logged message. Rows are mapped to `Message`s:
//! - a `messageRef` of `NotProvided` means no reference,
//! - a `jdiEvent` of `NONE` means no error code,
//! - missing or empty `toSystem`/`fromSystem` columns mean no supplier label.

use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Deserialize;

use crate::error::util::safe_open_file;
use crate::error::{MetricsError, Result};
use crate::models::{Interaction, Message};
use crate::utils::logging::{log_operation_complete, log_operation_start};

const NO_MESSAGE_REF: &str = "NotProvided";
const NO_ERROR_CODE: &str = "NONE";
const SPINE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// One raw row of a spine extract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpineItem {
    #[serde(rename = "_time")]
    pub time: String,
    #[serde(rename = "conversationID")]
    pub conversation_id: String,
    #[serde(rename = "GUID")]
    pub guid: String,
    #[serde(rename = "interactionID")]
    pub interaction_id: String,
    #[serde(rename = "messageSender")]
    pub message_sender: String,
    #[serde(rename = "messageRecipient")]
    pub message_recipient: String,
    #[serde(rename = "messageRef")]
    pub message_ref: String,
    #[serde(rename = "jdiEvent")]
    pub jdi_event: String,
    #[serde(rename = "toSystem", default)]
    pub to_system: Option<String>,
    #[serde(rename = "fromSystem", default)]
    pub from_system: Option<String>,
}

fn parse_spine_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(value, SPINE_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| MetricsError::InvalidRecord(format!("unparseable time '{value}': {e}")))
}

fn parse_message_ref(value: String) -> Option<String> {
    (value != NO_MESSAGE_REF && !value.is_empty()).then_some(value)
}

fn parse_error_code(value: &str) -> Result<Option<u32>> {
    if value == NO_ERROR_CODE || value.is_empty() {
        return Ok(None);
    }
    value
        .trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| MetricsError::InvalidRecord(format!("invalid error code '{value}': {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Convert a raw spine row to a message
pub fn construct_message(item: SpineItem) -> Result<Message> {
    Ok(Message {
        time: parse_spine_time(&item.time)?,
        interaction: Interaction::from(item.interaction_id.as_str()),
        error_code: parse_error_code(&item.jdi_event)?,
        conversation_id: item.conversation_id,
        guid: item.guid,
        from_party_asid: item.message_sender,
        to_party_asid: item.message_recipient,
        message_ref: parse_message_ref(item.message_ref),
        from_system: non_empty(item.from_system),
        to_system: non_empty(item.to_system),
    })
}

/// Convert raw spine rows to messages, keeping their order
pub fn construct_messages_from_spine_items(
    items: impl IntoIterator<Item = SpineItem>,
) -> Result<Vec<Message>> {
    items.into_iter().map(construct_message).collect()
}

/// Read spine messages from any CSV source
pub fn read_spine_csv<R: Read>(reader: R) -> Result<Vec<Message>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<SpineItem>()
        .map(|row| construct_message(row?))
        .collect()
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Read one spine extract, gunzipping `.gz` files
pub fn read_spine_csv_file(path: &Path) -> Result<Vec<Message>> {
    let start = Instant::now();
    log_operation_start("Reading spine messages from", path);

    let file = BufReader::new(safe_open_file(path, "spine message extract")?);
    let messages = if is_gzip(path) {
        read_spine_csv(GzDecoder::new(file))?
    } else {
        read_spine_csv(file)?
    };

    log_operation_complete("read", path, messages.len(), Some(start.elapsed()));
    Ok(messages)
}

/// Read several spine extracts in parallel
///
/// Messages are returned in file order, then row order, so conversation
/// grouping sees the same arrival order as a sequential read.
pub fn read_spine_csv_files(
    paths: &[PathBuf],
    progress: Option<&ProgressBar>,
) -> Result<Vec<Message>> {
    let per_file: Vec<Vec<Message>> = paths
        .par_iter()
        .map(|path| {
            let messages = read_spine_csv_file(path);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            messages
        })
        .collect::<Result<_>>()?;

    Ok(per_file.into_iter().flatten().collect())
}
