//! Progress notifiers for the terminal

pub mod reporter;

pub use reporter::{ProgressReporter, SimpleProgress};
