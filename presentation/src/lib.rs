//! Presentation layer for askbatch
//!
//! This crate contains CLI definitions, report formatters and progress
//! reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use output::{AsciiTable, ReportFormatter};
pub use progress::{ProgressReporter, SimpleProgress};
