//! Sign-in credentials value object

use serde::{Deserialize, Serialize};

/// Default account email of a local development server.
pub const DEFAULT_EMAIL: &str = "admin@admin.com";

/// Default account password of a local development server.
pub const DEFAULT_PASSWORD: &str = "admin";

/// Email/password pair used to open a session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL, DEFAULT_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
