//! Aggregate timing statistics

use crate::testing::result::TestResult;
use serde::Serialize;

/// Summary row of a batch report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub count: usize,
    pub passed: usize,
    pub failed: usize,
    pub min_processing_ms: u64,
    pub max_processing_ms: u64,
    /// Average processing time, rounded to two decimals.
    pub avg_processing_ms: f64,
}

impl BatchStats {
    pub fn from_results(results: &[TestResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let count = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let times = results.iter().map(|r| r.processing_time_ms);

        let min_processing_ms = times.clone().min().unwrap_or(0);
        let max_processing_ms = times.clone().max().unwrap_or(0);
        let total: u64 = times.sum();
        let avg = total as f64 / count as f64;

        Self {
            count,
            passed,
            failed: count - passed,
            min_processing_ms,
            max_processing_ms,
            avg_processing_ms: (avg * 100.0).round() / 100.0,
        }
    }

    /// Success rate (0.0 - 1.0)
    pub fn pass_rate(&self) -> f64 {
        if self.count > 0 {
            self.passed as f64 / self.count as f64
        } else {
            0.0
        }
    }
}
