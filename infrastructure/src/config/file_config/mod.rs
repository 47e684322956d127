//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod execution;
mod output;
mod server;

pub use execution::FileExecutionConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use server::FileServerConfig;

use askbatch_application::{ConfigError, TestClientConfig};
use askbatch_domain::Credentials;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("email cannot be empty")]
    EmptyEmail,

    #[error(transparent)]
    Client(#[from] ConfigError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint and account
    pub server: FileServerConfig,
    /// Polling and dispatch settings
    pub execution: FileExecutionConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.server.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        if self.server.email.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEmail);
        }

        if let Some(0) = self.server.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        self.to_client_config().map(|_| ())
    }

    /// Builds the batch runner configuration.
    pub fn to_client_config(&self) -> Result<TestClientConfig, ConfigValidationError> {
        let config = TestClientConfig::default()
            .with_credentials(Credentials::new(
                self.server.email.clone(),
                self.server.password.clone(),
            ))
            .with_check_interval(Duration::from_millis(self.execution.check_interval_ms))?
            .with_max_check_time(Duration::from_millis(self.execution.max_check_time_ms))?
            .with_clear_conversation(self.execution.clear_conversation)
            .with_async_mode(self.execution.async_mode);

        Ok(config)
    }

    /// HTTP timeout for the REST adapter, if configured.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.server.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbatch_domain::ReportFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
base_url = "https://nlp.example.com/api/v1/"
email = "tester@example.com"
password = "hunter2"
timeout_seconds = 30

[execution]
check_interval_ms = 500
max_check_time_ms = 30000
clear_conversation = true
async_mode = false

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.email, "tester@example.com");
        assert_eq!(config.server.timeout_seconds, Some(30));
        assert_eq!(config.execution.check_interval_ms, 500);
        assert!(config.execution.clear_conversation);
        assert!(!config.execution.async_mode);
        assert_eq!(config.output.format, Some(ReportFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8081/api/v1/");
        assert!(config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_client_config() {
        let mut config = FileConfig::default();
        config.execution.check_interval_ms = 100;
        config.execution.max_check_time_ms = 250;
        config.execution.async_mode = false;

        let client = config.to_client_config().unwrap();
        assert_eq!(client.check_interval, Duration::from_millis(100));
        assert_eq!(client.max_check_time, Duration::from_millis(250));
        assert!(!client.async_mode);
        assert_eq!(client.credentials, Credentials::default());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[server]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_zero_check_interval() {
        let toml_str = r#"
[execution]
check_interval_ms = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::Client(ConfigError::NotPositive(
                "check_interval"
            )))
        );
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = FileConfig::default();
        config.server.base_url = "localhost:8081".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));
    }
}
