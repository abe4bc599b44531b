//! End-to-end metrics pipeline
//!
//! spine messages → conversations → parsed conversations (scoped to the
//! reporting month) → transfers → practice and national presentations.
//!
//! The calculation functions are pure apart from logging diagnostics once per
//! run; `run` adds the file reading and writing around them.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::{debug, info};

use crate::algorithm::{
    ParsedConversations, aggregate_national, aggregate_practice, derive_transfers,
    group_into_conversations, parse_conversations,
};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::filter::{DateTimeRange, ReportingMonth, filter_conversations_by_request_started_time};
use crate::models::{Message, PracticeLookup, Transfer};
use crate::presentation::{
    NationalMetricsPresentation, PracticeMetricsPresentation, construct_national_metrics,
    construct_organisation_metadata, construct_practice_summaries,
};
use crate::utils::io::{
    read_practice_directory, read_spine_csv_files, write_json_file, write_transfers_parquet,
};
use crate::utils::logging::{
    create_main_progress_bar, create_spinner, finish_progress_bar, log_warning,
};

/// Transfers of the reporting month and how many conversations were dropped
#[derive(Debug, Clone, Default)]
pub struct TransferParseOutcome {
    /// Transfers whose EHR request falls in the reporting window
    pub transfers: Vec<Transfer>,
    /// Conversations that did not start with an EHR request
    pub dropped_conversations: usize,
}

/// Reconstruct the transfers requested inside the time range
///
/// # Arguments
/// * `messages` - Spine messages in log order
/// * `time_range` - Reporting window
/// * `parallel` - Parse and classify on the rayon pool
#[must_use]
pub fn parse_transfers_from_messages(
    messages: impl IntoIterator<Item = Message>,
    time_range: DateTimeRange,
    parallel: bool,
) -> TransferParseOutcome {
    let conversations = group_into_conversations(messages);
    let ParsedConversations { parsed, dropped } = parse_conversations(conversations, parallel);

    if !dropped.is_empty() {
        log_warning(
            &format!(
                "Dropped {} conversations that do not start with an EHR request",
                dropped.len()
            ),
            None,
        );
    }

    let in_range: Vec<_> =
        filter_conversations_by_request_started_time(parsed, time_range).collect();

    TransferParseOutcome {
        transfers: derive_transfers(&in_range, parallel),
        dropped_conversations: dropped.len(),
    }
}

/// Practice presentation plus the requesting ASIDs no practice owns
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeMetricsData {
    pub presentation: PracticeMetricsPresentation,
    pub unresolved_asids: BTreeSet<String>,
}

/// Calculate the practice dashboard for the reporting month
pub fn calculate_practice_metrics_data(
    transfers: &[Transfer],
    lookup: &PracticeLookup,
    month: ReportingMonth,
    generated_on: DateTime<Utc>,
) -> Result<PracticeMetricsData> {
    let outcome = aggregate_practice(transfers, lookup, month.time_range()?);

    if !outcome.unresolved_asids.is_empty() {
        log_warning(
            &format!("Unexpected ASID count: {}", outcome.unresolved_asids.len()),
            None,
        );
        debug!(
            "Unresolved requesting ASIDs: {}",
            outcome.unresolved_asids.iter().join(", ")
        );
    }

    Ok(PracticeMetricsData {
        presentation: construct_practice_summaries(&outcome.practices, month, generated_on),
        unresolved_asids: outcome.unresolved_asids,
    })
}

/// Calculate the national dashboard for the reporting month
pub fn calculate_national_metrics_data(
    transfers: &[Transfer],
    month: ReportingMonth,
    generated_on: DateTime<Utc>,
) -> Result<NationalMetricsPresentation> {
    let national_metrics = aggregate_national(transfers, month.time_range()?);
    Ok(construct_national_metrics(&national_metrics, month, generated_on))
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub month: ReportingMonth,
    pub message_count: usize,
    pub transfer_count: usize,
    pub dropped_conversations: usize,
    pub unresolved_asid_count: usize,
}

/// Run the whole pipeline from input files to output files
///
/// Outputs whose path is not configured are skipped.
pub fn run(config: &PipelineConfig, generated_on: DateTime<Utc>) -> Result<RunSummary> {
    config.validate()?;
    let month = config.reporting_month()?;
    let time_range = month.time_range()?;
    let start = Instant::now();
    info!("Calculating GP2GP metrics for {month}");

    let lookup = PracticeLookup::from(read_practice_directory(&config.organisation_list_file)?);

    let read_pb = config.show_progress.then(|| {
        create_main_progress_bar(config.input_files.len() as u64, Some("Reading spine extracts"))
    });
    let messages = read_spine_csv_files(&config.input_files, read_pb.as_ref())?;
    if let Some(pb) = &read_pb {
        finish_progress_bar(pb, Some("Spine extracts read"));
    }
    let message_count = messages.len();

    let parse_pb = config
        .show_progress
        .then(|| create_spinner(Some("Reconstructing transfers")));
    let outcome = parse_transfers_from_messages(messages, time_range, config.parallel);
    if let Some(pb) = &parse_pb {
        finish_progress_bar(pb, Some("Transfers reconstructed"));
    }
    info!(
        "Reconstructed {} transfers from {message_count} messages",
        outcome.transfers.len()
    );

    let practice_data =
        calculate_practice_metrics_data(&outcome.transfers, &lookup, month, generated_on)?;
    let national_data = calculate_national_metrics_data(&outcome.transfers, month, generated_on)?;

    if let Some(path) = &config.practice_metrics_output_file {
        write_json_file(&practice_data.presentation, path)?;
    }
    if let Some(path) = &config.national_metrics_output_file {
        write_json_file(&national_data, path)?;
    }
    if let Some(path) = &config.organisation_metadata_output_file {
        write_json_file(&construct_organisation_metadata(&lookup, generated_on), path)?;
    }
    if let Some(path) = &config.transfers_output_file {
        write_transfers_parquet(&outcome.transfers, path)?;
    }

    info!("Pipeline finished in {:?}", start.elapsed());

    Ok(RunSummary {
        month,
        message_count,
        transfer_count: outcome.transfers.len(),
        dropped_conversations: outcome.dropped_conversations,
        unresolved_asid_count: practice_data.unresolved_asids.len(),
    })
}
