//! Application-level configuration.
//!
//! - [`TestClientConfig`]: immutable option bundle of one batch runner

pub mod client_config;

pub use client_config::{
    ConfigError, DEFAULT_CHECK_INTERVAL, DEFAULT_MAX_CHECK_TIME, TestClientConfig,
};
