//! Progress notification port
//!
//! Defines the interface for reporting progress while a batch runs.

use askbatch_domain::{BatchReport, DatasourceId};

/// Callback for progress updates during batch execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain logs, etc.)
pub trait BatchProgressNotifier: Send + Sync {
    /// Called once the batch passed validation, before sign-in
    fn on_batch_start(&self, total_sentences: usize);

    /// Called when a sentence has its final outcome (ready or ask failure)
    fn on_sentence_resolved(&self, index: usize, text: &str, success: bool);

    /// Called with the validated report, after cleanup
    fn on_report(&self, report: &BatchReport);

    fn on_datasource_provisioned(&self, _model_id: &str, _datasource_id: DatasourceId) {}

    /// Called after each status check
    fn on_poll(&self, _attempt: u32, _resolved: usize, _outstanding: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BatchProgressNotifier for NoProgress {
    fn on_batch_start(&self, _total_sentences: usize) {}
    fn on_sentence_resolved(&self, _index: usize, _text: &str, _success: bool) {}
    fn on_report(&self, _report: &BatchReport) {}
}
