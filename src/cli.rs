use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Enrich container vulnerability-scan reports with image label attributes
#[derive(Parser, Debug)]
#[command(name = "scan-enrich")]
#[command(version)]
#[command(about = "Enrich container vulnerability-scan reports with image label attributes", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the Image ID -> attribute lookup table from a scan report
    Extract(ExtractArgs),
    /// Merge the lookup table back onto the original report
    Merge(MergeArgs),
    /// Drive the platform's report-generation API
    Fetch {
        #[command(subcommand)]
        action: FetchAction,
    },
}

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Source report CSV
    #[arg(short, long)]
    pub source: PathBuf,

    /// Output path for the lookup-table CSV
    #[arg(short, long)]
    pub output: PathBuf,

    /// Header name of the image id column [default: Image ID]
    #[arg(long)]
    pub key_column: Option<String>,

    /// Header name of the JSON label column [default: Container Labels]
    #[arg(long)]
    pub label_column: Option<String>,

    /// Label key to extract, matched case-sensitively [default: MAINTAINER]
    #[arg(long)]
    pub label_key: Option<String>,

    /// Header name for the extracted attribute [default: Maintainer]
    #[arg(long)]
    pub attribute_column: Option<String>,

    /// Only process the first N rows (for testing)
    #[arg(long)]
    pub max_rows: Option<u64>,

    /// Config file path (default: discover scan-enrich.config.yml in the
    /// working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// The original report CSV
    #[arg(short, long)]
    pub source: PathBuf,

    /// The lookup-table CSV written by the extract stage
    #[arg(short, long)]
    pub lookup: PathBuf,

    /// Output path for the merged CSV
    #[arg(short, long)]
    pub output: PathBuf,

    /// Header name of the image id column [default: Image ID]
    #[arg(long)]
    pub key_column: Option<String>,

    /// Header name of the attribute column [default: Maintainer]
    #[arg(long)]
    pub attribute_column: Option<String>,

    /// Config file path (default: discover scan-enrich.config.yml in the
    /// working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum FetchAction {
    /// List the report definitions available to the tenant
    List,
    /// Generate a report on demand, wait for it, download and decompress it
    Report(FetchReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct FetchReportArgs {
    /// Id of the report definition to generate
    #[arg(long)]
    pub id: i64,

    /// Trailing time window the report covers, in hours
    #[arg(long, default_value_t = 24)]
    pub window_hours: u64,

    /// Destination for the decompressed report CSV
    #[arg(short, long, default_value = "v2-report.csv")]
    pub output: PathBuf,

    /// Job and file name submitted to the platform
    #[arg(long)]
    pub job_name: Option<String>,

    /// Override the poll interval (default 30, or SECURE_POLL_INTERVAL_SECS)
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,

    /// Override the overall poll timeout (default 7200, or SECURE_POLL_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
