//! Test sentence entity

use crate::core::ids::DatasourceId;
use crate::testing::result::QueryResult;
use std::sync::Arc;

/// Predicate applied to a successful query result.
pub type ResultCheck = Arc<dyn Fn(&QueryResult) -> bool + Send + Sync>;

/// Predicate applied to the error text of a failed request.
pub type ErrorCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Where a sentence is sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SentenceTarget {
    /// An existing datasource on the remote service.
    Datasource(DatasourceId),
    /// A model; a throwaway datasource is provisioned for it.
    Model(String),
}

/// Expected outcome of a sentence, with the optional predicate for it.
///
/// A result check only exists on expected-success sentences and an error
/// check only on expected-failure ones, so at most one predicate is present.
#[derive(Clone)]
pub enum Expectation {
    Success(Option<ResultCheck>),
    Failure(Option<ErrorCheck>),
}

impl Expectation {
    pub fn is_success(&self) -> bool {
        matches!(self, Expectation::Success(_))
    }

    /// Whether a predicate is attached for the expected outcome.
    pub fn has_check(&self) -> bool {
        match self {
            Expectation::Success(check) => check.is_some(),
            Expectation::Failure(check) => check.is_some(),
        }
    }
}

impl std::fmt::Debug for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, checked) = match self {
            Expectation::Success(check) => ("Success", check.is_some()),
            Expectation::Failure(check) => ("Failure", check.is_some()),
        };
        f.debug_struct(name).field("checked", &checked).finish()
    }
}

/// One natural-language sentence of a batch (immutable input).
#[derive(Debug, Clone)]
pub struct TestSentence {
    text: String,
    target: SentenceTarget,
    expectation: Expectation,
}

impl TestSentence {
    /// Creates a sentence expected to succeed, without a predicate.
    pub fn new(text: impl Into<String>, target: SentenceTarget) -> Self {
        Self {
            text: text.into(),
            target,
            expectation: Expectation::Success(None),
        }
    }

    /// Sentence sent to a throwaway datasource provisioned for `model_id`.
    pub fn for_model(text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self::new(text, SentenceTarget::Model(model_id.into()))
    }

    /// Sentence sent to an existing datasource.
    pub fn for_datasource(text: impl Into<String>, datasource_id: DatasourceId) -> Self {
        Self::new(text, SentenceTarget::Datasource(datasource_id))
    }

    /// Expects a failure, dropping any result check.
    pub fn expect_failure(mut self) -> Self {
        if self.expectation.is_success() {
            self.expectation = Expectation::Failure(None);
        }
        self
    }

    /// Expects success, dropping any error check.
    pub fn expect_success(mut self) -> Self {
        if !self.expectation.is_success() {
            self.expectation = Expectation::Success(None);
        }
        self
    }

    /// Expects success and validates the result with `check`.
    pub fn with_result_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&QueryResult) -> bool + Send + Sync + 'static,
    {
        self.expectation = Expectation::Success(Some(Arc::new(check)));
        self
    }

    /// Expects failure and validates the error text with `check`.
    pub fn with_error_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.expectation = Expectation::Failure(Some(Arc::new(check)));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> &SentenceTarget {
        &self.target
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn is_successful(&self) -> bool {
        self.expectation.is_success()
    }

    pub fn has_check(&self) -> bool {
        self.expectation.has_check()
    }

    pub fn model_id(&self) -> Option<&str> {
        match &self.target {
            SentenceTarget::Model(model) => Some(model),
            SentenceTarget::Datasource(_) => None,
        }
    }

    pub fn datasource_id(&self) -> Option<DatasourceId> {
        match &self.target {
            SentenceTarget::Datasource(id) => Some(*id),
            SentenceTarget::Model(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_model_defaults_to_success_without_check() {
        let s = TestSentence::for_model("what time is it", "time.ex");
        assert_eq!(s.text(), "what time is it");
        assert_eq!(s.model_id(), Some("time.ex"));
        assert_eq!(s.datasource_id(), None);
        assert!(s.is_successful());
        assert!(!s.has_check());
    }

    #[test]
    fn test_result_check_implies_success() {
        let s = TestSentence::for_model("weather", "weather.ex")
            .expect_failure()
            .with_result_check(|r| r.result_body.is_some());
        assert!(s.is_successful());
        assert!(s.has_check());
    }

    #[test]
    fn test_error_check_replaces_result_check() {
        let s = TestSentence::for_datasource("blah", DatasourceId::new(7))
            .with_result_check(|_| true)
            .with_error_check(|e| e.contains("rejected"));
        assert!(!s.is_successful());
        assert!(s.has_check());
        assert_eq!(s.datasource_id(), Some(DatasourceId::new(7)));
    }

    #[test]
    fn test_expect_success_drops_error_check() {
        let s = TestSentence::for_model("x", "m")
            .with_error_check(|_| false)
            .expect_success();
        assert!(s.is_successful());
        assert!(!s.has_check());
    }

    #[test]
    fn test_expectation_debug() {
        let s = TestSentence::for_model("x", "m").with_error_check(|_| true);
        assert_eq!(format!("{:?}", s.expectation()), "Failure { checked: true }");
    }
}
