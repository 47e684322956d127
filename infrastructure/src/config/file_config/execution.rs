//! Execution configuration from TOML (`[execution]` section)

use askbatch_application::config::{DEFAULT_CHECK_INTERVAL, DEFAULT_MAX_CHECK_TIME};
use serde::{Deserialize, Serialize};

/// Raw execution configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Delay after each status check, in milliseconds
    pub check_interval_ms: u64,
    /// Polling budget per wave, in milliseconds
    pub max_check_time_ms: u64,
    /// Clear conversation before every sentence
    pub clear_conversation: bool,
    /// Submit all sentences at once
    pub async_mode: bool,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: DEFAULT_CHECK_INTERVAL.as_millis() as u64,
            max_check_time_ms: DEFAULT_MAX_CHECK_TIME.as_millis() as u64,
            clear_conversation: false,
            async_mode: true,
        }
    }
}
