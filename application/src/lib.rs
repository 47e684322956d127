//! Application layer for askbatch
//!
//! This crate contains the batch use case, its port definitions, and the
//! client configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigError, TestClientConfig};
pub use ports::{
    nlp_service::{NlpService, ServiceError},
    progress::{BatchProgressNotifier, NoProgress},
};
pub use use_cases::run_batch::{BatchRun, RunBatchError, RunBatchUseCase};
