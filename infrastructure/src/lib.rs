//! Infrastructure layer for askbatch
//!
//! This crate contains the adapters that implement the ports defined in the
//! application layer, plus configuration and batch file loading.

pub mod batch_file;
pub mod config;
pub mod rest;

// Re-export commonly used types
pub use batch_file::{BatchFileError, SentenceEntry, load_batch_file, parse_batch};
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExecutionConfig, FileOutputConfig,
    FileOutputFormat, FileServerConfig,
};
pub use rest::{DEFAULT_BASE_URL, RestError, RestNlpService};
