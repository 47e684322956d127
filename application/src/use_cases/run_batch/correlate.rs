//! Result correlator
//!
//! Maps request outcomes back to the positions of the sentences that
//! produced them. Results always come out in the input order, one per
//! sentence.

use super::dispatch::ResolvedTarget;
use super::error::RunBatchError;
use askbatch_domain::{RequestState, TestResult, TestSentence};

/// Final outcome of a single sentence, before validation.
#[derive(Debug, Clone)]
pub(crate) enum SentenceOutcome {
    /// The request reached a terminal state
    Completed(RequestState),
    /// The ask call failed, the message is kept as the result's error
    SubmissionFailed(String),
}

pub(crate) struct Correlator {
    slots: Vec<Option<SentenceOutcome>>,
}

impl Correlator {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub(crate) fn record(&mut self, index: usize, outcome: SentenceOutcome) -> Result<(), RunBatchError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| RunBatchError::Correlation(format!("no sentence at index {}", index)))?;

        if slot.is_some() {
            return Err(RunBatchError::Correlation(format!(
                "sentence {} resolved twice",
                index
            )));
        }

        *slot = Some(outcome);
        Ok(())
    }

    /// Builds one [`TestResult`] per sentence, in input order.
    pub(crate) fn finish(
        self,
        sentences: &[TestSentence],
        targets: &[ResolvedTarget],
    ) -> Result<Vec<TestResult>, RunBatchError> {
        self.slots
            .into_iter()
            .zip(sentences.iter().zip(targets))
            .enumerate()
            .map(|(index, (slot, (sentence, target)))| {
                let outcome = slot.ok_or_else(|| {
                    RunBatchError::Correlation(format!(
                        "sentence {} ('{}') has no result",
                        index,
                        sentence.text()
                    ))
                })?;

                Ok(match outcome {
                    SentenceOutcome::Completed(state) => TestResult::completed(
                        sentence.text(),
                        target.datasource_id,
                        target.model_id.clone(),
                        &state,
                    ),
                    SentenceOutcome::SubmissionFailed(error) => TestResult::submission_failed(
                        sentence.text(),
                        target.datasource_id,
                        target.model_id.clone(),
                        error,
                    ),
                })
            })
            .collect()
    }
}
