//! Report format value object

use serde::{Deserialize, Serialize};

/// How a finished batch report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Fixed-width result and statistics tables (default)
    #[default]
    Table,
    /// JSON document with results and statistics
    Json,
}
