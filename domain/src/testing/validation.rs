//! Applying caller predicates to results
//!
//! A failed predicate becomes a validation message on the result. The raw
//! `result` and `error` fields are never rewritten.

use crate::testing::result::TestResult;
use crate::testing::sentence::{Expectation, TestSentence};

/// Message recorded when a result check returns `false`.
pub const RESULT_CHECK_FAILED: &str = "Check result function invocation was not successful";

/// Message recorded when an error check returns `false`.
pub const ERROR_CHECK_FAILED: &str = "Check error function invocation was not successful";

/// Runs the sentence's predicate against its result.
///
/// The result check only runs when the request produced no error, and the
/// error check only when it did. Returns the validation message on failure.
pub fn validate(sentence: &TestSentence, result: &TestResult) -> Option<String> {
    match (sentence.expectation(), result.error.as_deref()) {
        (Expectation::Success(Some(check)), None) => {
            (!check(&result.query_result())).then(|| RESULT_CHECK_FAILED.to_string())
        }
        (Expectation::Failure(Some(check)), Some(error)) => {
            (!check(error)).then(|| ERROR_CHECK_FAILED.to_string())
        }
        _ => None,
    }
}

/// Returns `result` with its validation field set from [`validate`].
pub fn apply_validation(sentence: &TestSentence, mut result: TestResult) -> TestResult {
    result.validation_error = validate(sentence, &result);
    result
}
