//! Configuration file loading for askbatch
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ASKBATCH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./askbatch.toml` or `./.askbatch.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/askbatch/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileExecutionConfig, FileOutputConfig, FileOutputFormat,
    FileServerConfig,
};
pub use loader::ConfigLoader;
