//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: identifiers handed out by the remote service
//! - [`credentials::Credentials`]: sign-in credentials
//! - [`error::BatchError`]: batch configuration errors

pub mod credentials;
pub mod error;
pub mod ids;
