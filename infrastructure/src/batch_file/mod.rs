//! Batch definition files
//!
//! A batch is a TOML file with one `[[sentence]]` table per test sentence:
//!
//! ```toml
//! [[sentence]]
//! text = "What's the weather in Paris?"
//! model = "nlpcraft.weather.ex"
//! result_contains = "Paris"
//!
//! [[sentence]]
//! text = "Blah blah"
//! datasource_id = 12
//! expect = "failure"
//! error_contains = "not understood"
//! ```
//!
//! The declarative `*_contains` / `result_type` fields become predicate
//! closures on the resulting [`TestSentence`]s.

use askbatch_domain::{DatasourceId, TestSentence};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while reading a batch file
#[derive(Error, Debug)]
pub enum BatchFileError {
    #[error("Failed to read batch file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid batch file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Sentence #{index}: {reason}")]
    Entry { index: usize, reason: String },
}

/// Expected outcome of an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedOutcome {
    #[default]
    Success,
    Failure,
}

/// One `[[sentence]]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentenceEntry {
    pub text: String,
    pub datasource_id: Option<i64>,
    pub model: Option<String>,
    #[serde(default)]
    pub expect: ExpectedOutcome,
    /// Result body must contain this text
    pub result_contains: Option<String>,
    /// Result type must equal this value
    pub result_type: Option<String>,
    /// Error text must contain this text
    pub error_contains: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchDocument {
    #[serde(default)]
    sentence: Vec<SentenceEntry>,
}

impl SentenceEntry {
    /// Converts the entry into a sentence. `index` is only used for errors.
    pub fn into_sentence(self, index: usize) -> Result<TestSentence, BatchFileError> {
        let entry_error = |reason: &str| BatchFileError::Entry {
            index,
            reason: reason.to_string(),
        };

        let sentence = match (self.datasource_id, self.model) {
            (Some(id), None) => TestSentence::for_datasource(self.text, DatasourceId::new(id)),
            (None, Some(model)) => TestSentence::for_model(self.text, model),
            (Some(_), Some(_)) => {
                return Err(entry_error("set either datasource_id or model, not both"));
            }
            (None, None) => return Err(entry_error("one of datasource_id or model is required")),
        };

        match self.expect {
            ExpectedOutcome::Success => {
                if self.error_contains.is_some() {
                    return Err(entry_error(
                        "error_contains only applies to expect = \"failure\"",
                    ));
                }
                Ok(with_result_predicate(
                    sentence,
                    self.result_contains,
                    self.result_type,
                ))
            }
            ExpectedOutcome::Failure => {
                if self.result_contains.is_some() || self.result_type.is_some() {
                    return Err(entry_error(
                        "result_contains and result_type only apply to expect = \"success\"",
                    ));
                }
                let sentence = sentence.expect_failure();
                Ok(match self.error_contains {
                    Some(needle) => sentence.with_error_check(move |error| error.contains(&needle)),
                    None => sentence,
                })
            }
        }
    }
}

fn with_result_predicate(
    sentence: TestSentence,
    contains: Option<String>,
    result_type: Option<String>,
) -> TestSentence {
    if contains.is_none() && result_type.is_none() {
        return sentence;
    }

    sentence.with_result_check(move |result| {
        let body_ok = contains.as_deref().is_none_or(|needle| {
            result
                .result_body
                .as_deref()
                .is_some_and(|body| body.contains(needle))
        });
        let type_ok = result_type
            .as_deref()
            .is_none_or(|expected| result.result_type.as_deref() == Some(expected));
        body_ok && type_ok
    })
}

/// Parses a batch from TOML text.
pub fn parse_batch(content: &str) -> Result<Vec<TestSentence>, BatchFileError> {
    let document: BatchDocument = toml::from_str(content)?;

    document
        .sentence
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_sentence(index + 1))
        .collect()
}

/// Reads and parses a batch file.
pub fn load_batch_file(path: &Path) -> Result<Vec<TestSentence>, BatchFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| BatchFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_batch(&content)
}
