//! Batch-level configuration checks
//!
//! Run before any remote call: a batch that fails here never signs in.

use crate::core::error::{BatchError, DuplicateField, DuplicatePair};
use crate::testing::sentence::{SentenceTarget, TestSentence};
use std::collections::HashSet;

/// Validates a batch: non-empty, non-empty texts, and unique
/// `(text, datasource)` and `(text, model)` pairs.
pub fn validate_batch(sentences: &[TestSentence]) -> Result<(), BatchError> {
    if sentences.is_empty() {
        return Err(BatchError::EmptyBatch);
    }

    if let Some(index) = sentences.iter().position(|s| s.text().trim().is_empty()) {
        return Err(BatchError::EmptySentence { index });
    }

    check_duplicates(sentences, DuplicateField::Datasource)?;
    check_duplicates(sentences, DuplicateField::Model)?;

    Ok(())
}

fn target_key(target: &SentenceTarget, field: DuplicateField) -> Option<String> {
    match (target, field) {
        (SentenceTarget::Datasource(id), DuplicateField::Datasource) => Some(id.to_string()),
        (SentenceTarget::Model(model), DuplicateField::Model) => Some(model.clone()),
        _ => None,
    }
}

fn check_duplicates(sentences: &[TestSentence], field: DuplicateField) -> Result<(), BatchError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut pairs = Vec::new();

    for sentence in sentences {
        let Some(target) = target_key(sentence.target(), field) else {
            continue;
        };
        let key = (sentence.text().to_string(), target);

        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            pairs.push(DuplicatePair {
                field,
                text: key.0,
                target: key.1,
            });
        }
    }

    if pairs.is_empty() {
        Ok(())
    } else {
        Err(BatchError::DuplicateSentences { field, pairs })
    }
}
