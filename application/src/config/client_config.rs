//! Test client configuration.
//!
//! [`TestClientConfig`] is built once per [`RunBatchUseCase`](crate::RunBatchUseCase)
//! and never changes afterwards. The remote endpoint itself belongs to the
//! service adapter, not to this struct.

use askbatch_domain::Credentials;
use std::time::Duration;
use thiserror::Error;

/// Default delay between status checks.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(2000);

/// Default budget for waiting on all outstanding requests of one wave.
pub const DEFAULT_MAX_CHECK_TIME: Duration = Duration::from_millis(10_000);

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Argument '{0}' must be positive")]
    NotPositive(&'static str),
}

/// Batch runner configuration.
///
/// | Option | Default |
/// |--------|---------|
/// | `check_interval` | 2000 ms |
/// | `max_check_time` | 10000 ms |
/// | `clear_conversation` | false |
/// | `async_mode` | true |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestClientConfig {
    /// Sign-in credentials
    pub credentials: Credentials,
    /// Delay after each status check.
    pub check_interval: Duration,
    /// Maximum time spent polling one wave of requests.
    pub max_check_time: Duration,
    /// Clear conversation before every sentence, which forces one sentence
    /// at a time regardless of `async_mode`.
    pub clear_conversation: bool,
    /// Submit all sentences at once and poll them together.
    pub async_mode: bool,
}

impl Default for TestClientConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            max_check_time: DEFAULT_MAX_CHECK_TIME,
            clear_conversation: false,
            async_mode: true,
        }
    }
}

impl TestClientConfig {
    // ==================== Builder Methods ====================

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::NotPositive("check_interval"));
        }
        self.check_interval = interval;
        Ok(self)
    }

    pub fn with_max_check_time(mut self, budget: Duration) -> Result<Self, ConfigError> {
        if budget.is_zero() {
            return Err(ConfigError::NotPositive("max_check_time"));
        }
        self.max_check_time = budget;
        Ok(self)
    }

    pub fn with_clear_conversation(mut self, clear: bool) -> Self {
        self.clear_conversation = clear;
        self
    }

    pub fn with_async_mode(mut self, async_mode: bool) -> Self {
        self.async_mode = async_mode;
        self
    }
}
