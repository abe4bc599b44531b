//! Configuration for a metrics pipeline run.

use std::path::PathBuf;

use crate::error::{MetricsError, Result};
use crate::filter::ReportingMonth;

/// Where a run reads from and writes to, and how it executes
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Reporting year
    pub year: i32,
    /// Reporting month (1-12)
    pub month: u32,
    /// Spine extract files (`.csv` or `.csv.gz`)
    pub input_files: Vec<PathBuf>,
    /// Organisation list JSON with practices and their ASIDs
    pub organisation_list_file: PathBuf,
    /// Practice metrics JSON output
    pub practice_metrics_output_file: Option<PathBuf>,
    /// National metrics JSON output
    pub national_metrics_output_file: Option<PathBuf>,
    /// Organisation metadata JSON output
    pub organisation_metadata_output_file: Option<PathBuf>,
    /// Transfers Parquet output
    pub transfers_output_file: Option<PathBuf>,
    /// Parse and classify conversations on the rayon pool
    pub parallel: bool,
    /// Show progress bars while reading and parsing
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            input_files: Vec::new(),
            organisation_list_file: PathBuf::from("organisation_list.json"),
            practice_metrics_output_file: None,
            national_metrics_output_file: None,
            organisation_metadata_output_file: None,
            transfers_output_file: None,
            parallel: true,
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    /// The reporting month this run covers
    ///
    /// # Errors
    /// Returns an error if year/month do not name a calendar month
    pub fn reporting_month(&self) -> Result<ReportingMonth> {
        ReportingMonth::new(self.year, self.month)
    }

    /// Check the configuration before any input is read
    pub fn validate(&self) -> Result<()> {
        self.reporting_month()?;
        if self.input_files.is_empty() {
            return Err(MetricsError::Config(
                "at least one spine input file is required".to_string(),
            ));
        }
        Ok(())
    }
}
