//! Server configuration from TOML (`[server]` section)

use crate::rest::DEFAULT_BASE_URL;
use askbatch_domain::core::credentials::{DEFAULT_EMAIL, DEFAULT_PASSWORD};
use serde::{Deserialize, Serialize};

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// REST endpoint root, e.g. `http://localhost:8081/api/v1/`
    pub base_url: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// HTTP timeout in seconds for a single call
    pub timeout_seconds: Option<u64>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout_seconds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_section_partial() {
        let toml_str = r#"
[server]
base_url = "http://nlp.internal:8081/api/v1/"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "http://nlp.internal:8081/api/v1/");
        assert_eq!(config.server.email, DEFAULT_EMAIL);
        assert_eq!(config.server.timeout_seconds, None);
    }
}
