//! Test result value objects

use crate::core::ids::DatasourceId;
use crate::request::RequestState;
use serde::{Deserialize, Serialize};

/// Result view handed to result validation predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub result_type: Option<String>,
    pub result_body: Option<String>,
}

/// Outcome of one test sentence.
///
/// `validation_error` is absent when the sentence passed (or had no
/// predicate to fail).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Original sentence text
    pub text: String,
    /// Datasource the sentence was sent to
    pub datasource_id: DatasourceId,
    /// Model bound to that datasource, when known
    pub model_id: Option<String>,
    pub result_type: Option<String>,
    pub result: Option<String>,
    pub error: Option<String>,
    /// Remote processing time in milliseconds (0 when never processed)
    pub processing_time_ms: u64,
    pub validation_error: Option<String>,
}

impl TestResult {
    /// Builds a result from a terminal request state.
    pub fn completed(
        text: impl Into<String>,
        datasource_id: DatasourceId,
        model_id: Option<String>,
        state: &RequestState,
    ) -> Self {
        Self {
            text: text.into(),
            datasource_id,
            model_id,
            result_type: state.result_type.clone(),
            result: state.result_body.clone(),
            error: state.error.clone(),
            processing_time_ms: state.processing_time_ms(),
            validation_error: None,
        }
    }

    /// Builds a result for a sentence whose ask call failed.
    pub fn submission_failed(
        text: impl Into<String>,
        datasource_id: DatasourceId,
        model_id: Option<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            datasource_id,
            model_id,
            result_type: None,
            result: None,
            error: Some(error.into()),
            processing_time_ms: 0,
            validation_error: None,
        }
    }

    pub fn with_validation_error(mut self, message: impl Into<String>) -> Self {
        self.validation_error = Some(message.into());
        self
    }

    /// Returns `true` if no validation error was recorded.
    pub fn passed(&self) -> bool {
        self.validation_error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the raw outcome (error or not) is the one that was expected.
    pub fn outcome_matches(&self, expected_success: bool) -> bool {
        expected_success != self.is_error()
    }

    /// The result as seen by a result validation predicate.
    pub fn query_result(&self) -> QueryResult {
        QueryResult {
            result_type: self.result_type.clone(),
            result_body: self.result.clone(),
        }
    }
}
