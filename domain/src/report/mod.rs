//! Batch report model.
//!
//! [`BatchReport`] pairs every sentence with its result and carries the
//! aggregate [`BatchStats`]. Rendering lives in the presentation layer.

pub mod stats;

pub use stats::BatchStats;

use crate::core::ids::DatasourceId;
use crate::testing::result::TestResult;
use crate::testing::sentence::TestSentence;
use serde::Serialize;

/// One row of the per-sentence report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub text: String,
    pub datasource_id: DatasourceId,
    pub model_id: Option<String>,
    pub expected_success: bool,
    pub has_check: bool,
    pub result: Option<String>,
    pub error: Option<String>,
    pub validation_error: Option<String>,
    pub processing_time_ms: u64,
}

impl ReportRow {
    pub fn new(sentence: &TestSentence, result: &TestResult) -> Self {
        Self {
            text: result.text.clone(),
            datasource_id: result.datasource_id,
            model_id: result.model_id.clone(),
            expected_success: sentence.is_successful(),
            has_check: sentence.has_check(),
            result: result.result.clone(),
            error: result.error.clone(),
            validation_error: result.validation_error.clone(),
            processing_time_ms: result.processing_time_ms,
        }
    }

    /// Verdict column: the validation message, or "Passed".
    pub fn verdict(&self) -> &str {
        self.validation_error.as_deref().unwrap_or("Passed")
    }

    /// Whether the request errored when success was expected, or vice versa.
    pub fn is_unexpected(&self) -> bool {
        self.expected_success == self.error.is_some()
    }
}

/// Complete report for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<ReportRow>,
    pub stats: BatchStats,
}

impl BatchReport {
    /// Builds the report from sentences and their positionally matched results.
    pub fn new(sentences: &[TestSentence], results: &[TestResult]) -> Self {
        debug_assert_eq!(sentences.len(), results.len());

        let rows = sentences
            .iter()
            .zip(results)
            .map(|(sentence, result)| ReportRow::new(sentence, result))
            .collect();

        Self {
            rows,
            stats: BatchStats::from_results(results),
        }
    }

    /// Number of rows whose raw outcome contradicts the expectation.
    pub fn unexpected_outcomes(&self) -> usize {
        self.rows.iter().filter(|r| r.is_unexpected()).count()
    }

    /// No validation failures and no unexpected outcomes.
    pub fn is_clean(&self) -> bool {
        self.stats.failed == 0 && self.unexpected_outcomes() == 0
    }
}
