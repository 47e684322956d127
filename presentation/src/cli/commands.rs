//! CLI command definitions

use askbatch_domain::ReportFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the batch report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Result and statistics tables
    Table,
    /// JSON document with results and statistics
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => ReportFormat::Table,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// CLI arguments for askbatch
#[derive(Parser, Debug)]
#[command(name = "askbatch")]
#[command(author, version, about = "Run a batch of test sentences against an NLP query service")]
#[command(long_about = r#"
askbatch signs in to an NLP query service, creates a throwaway datasource
for every model referenced by the batch, submits the test sentences, waits
for their answers and checks them against the expectations in the batch
file. Throwaway datasources are deleted afterwards.

Configuration files are loaded from (in priority order):
1. ASKBATCH_* environment variables (e.g. ASKBATCH_SERVER__BASE_URL)
2. --config <path>     Explicit config file
3. ./askbatch.toml     Project-level config
4. ~/.config/askbatch/config.toml   Global config

Example:
  askbatch weather.toml
  askbatch --sync --clear-conversation -o json weather.toml
  askbatch --base-url http://nlp.internal:8081/api/v1/ -vv weather.toml
"#)]
pub struct Cli {
    /// Batch definition file (TOML with [[sentence]] entries)
    #[arg(value_name = "BATCH_FILE", required_unless_present = "show_config")]
    pub batch_file: Option<PathBuf>,

    /// Service endpoint root
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,

    /// Delay between status checks, in milliseconds
    #[arg(long, value_name = "MS")]
    pub check_interval_ms: Option<u64>,

    /// Maximum time to wait for answers, in milliseconds
    #[arg(long, value_name = "MS")]
    pub max_check_time_ms: Option<u64>,

    /// Clear conversation before every sentence (implies one sentence at a time)
    #[arg(long)]
    pub clear_conversation: bool,

    /// Send sentences one at a time instead of all at once
    #[arg(long)]
    pub sync: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
