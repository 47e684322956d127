//! Output configuration from TOML (`[output]` section)

use askbatch_domain::ReportFormat;
use serde::{Deserialize, Serialize};

// Re-export ReportFormat from domain for convenience
pub use askbatch_domain::ReportFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report format (uses domain type)
    pub format: Option<ReportFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
