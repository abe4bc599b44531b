use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use gp2gp_metrics::PipelineConfig;
use gp2gp_metrics::utils::logging::print_run_summary;

/// Calculate monthly GP2GP transfer metrics from spine extracts
#[derive(Parser, Debug)]
#[command(name = "gp2gp-metrics", version, about, long_about = None)]
struct Args {
    /// Reporting year
    #[arg(long)]
    year: i32,

    /// Reporting month (1-12)
    #[arg(long)]
    month: u32,

    /// Organisation list JSON with practices and their ASIDs
    #[arg(long)]
    organisation_list_file: PathBuf,

    /// Spine extract files (.csv or .csv.gz)
    #[arg(long = "input-files", num_args = 1.., required = true)]
    input_files: Vec<PathBuf>,

    /// Practice metrics JSON output
    #[arg(long)]
    practice_metrics_output_file: Option<PathBuf>,

    /// National metrics JSON output
    #[arg(long)]
    national_metrics_output_file: Option<PathBuf>,

    /// Organisation metadata JSON output
    #[arg(long)]
    organisation_metadata_output_file: Option<PathBuf>,

    /// Transfers Parquet output
    #[arg(long)]
    transfers_output_file: Option<PathBuf>,

    /// Parse conversations on a single thread
    #[arg(long)]
    sequential: bool,

    /// Hide progress bars
    #[arg(long)]
    quiet: bool,
}

impl From<Args> for PipelineConfig {
    fn from(args: Args) -> Self {
        Self {
            year: args.year,
            month: args.month,
            input_files: args.input_files,
            organisation_list_file: args.organisation_list_file,
            practice_metrics_output_file: args.practice_metrics_output_file,
            national_metrics_output_file: args.national_metrics_output_file,
            organisation_metadata_output_file: args.organisation_metadata_output_file,
            transfers_output_file: args.transfers_output_file,
            parallel: !args.sequential,
            show_progress: !args.quiet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::from(Args::parse());
    info!(
        "Processing {} spine extract(s) for {}-{:02}",
        config.input_files.len(),
        config.year,
        config.month
    );

    let summary = gp2gp_metrics::run(&config, chrono::Utc::now())
        .context("GP2GP metrics pipeline failed")?;

    print_run_summary(&summary);
    Ok(())
}
