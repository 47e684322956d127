//! Presentation-level configuration
//!
//! Resolved output settings, after config files and CLI flags are merged.

use askbatch_domain::ReportFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// How the final report is rendered
    pub format: ReportFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators while the batch runs
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Table,
            color: true,
            show_progress: true,
        }
    }
}
