//! Domain error types

use thiserror::Error;

/// Which identity of a sentence was duplicated within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Datasource,
    Model,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateField::Datasource => write!(f, "datasource"),
            DuplicateField::Model => write!(f, "model"),
        }
    }
}

/// A `(text, target)` pair that occurs more than once in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    pub field: DuplicateField,
    pub text: String,
    pub target: String,
}

impl std::fmt::Display for DuplicatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sentence={}, {}={}", self.text, self.field, self.target)
    }
}

fn join_pairs(pairs: &[DuplicatePair]) -> String {
    pairs
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Batch configuration errors, detected before any remote call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Batch contains no sentences")]
    EmptyBatch,

    #[error("Sentence #{index} has empty text")]
    EmptySentence { index: usize },

    #[error("Sentence texts cannot be duplicated within same {field}: [{}]", join_pairs(.pairs))]
    DuplicateSentences {
        field: DuplicateField,
        pairs: Vec<DuplicatePair>,
    },
}
