//! Run batch use case
//!
//! Runs a batch of test sentences against the remote service:
//!
//! 1. validate the batch (no network traffic for an invalid one)
//! 2. sign in
//! 3. provision one throwaway datasource per model
//! 4. submit and poll the sentences wave by wave
//! 5. delete the throwaway datasources and sign out, whatever happened
//! 6. apply the caller predicates and report

mod correlate;
mod dispatch;
pub mod error;
mod polling;
mod provision;
mod session;

#[cfg(test)]
mod fake;

pub use error::RunBatchError;

use crate::config::TestClientConfig;
use crate::ports::nlp_service::NlpService;
use crate::ports::progress::{BatchProgressNotifier, NoProgress};
use askbatch_domain::{
    AccessToken, BatchReport, DatasourceId, SentenceTarget, TestResult, TestSentence,
    apply_validation, validate_batch,
};
use correlate::Correlator;
use dispatch::{ResolvedTarget, Wave};
use polling::{PollingEngine, WaveItem};
use provision::EphemeralResources;
use session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Validated results of one batch, with the report built from them.
#[derive(Debug)]
pub struct BatchRun {
    /// One result per sentence, in input order
    pub results: Vec<TestResult>,
    pub report: BatchReport,
}

/// Use case for running a batch of test sentences
///
/// One batch runs at a time per instance; concurrent callers wait their turn.
pub struct RunBatchUseCase<S: NlpService + 'static> {
    service: Arc<S>,
    config: TestClientConfig,
    batch_lock: Mutex<()>,
}

impl<S: NlpService + 'static> RunBatchUseCase<S> {
    pub fn new(service: Arc<S>, config: TestClientConfig) -> Self {
        Self {
            service,
            config,
            batch_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &TestClientConfig {
        &self.config
    }

    /// Execute a batch, returning one result per sentence in input order.
    pub async fn execute(
        &self,
        sentences: Vec<TestSentence>,
    ) -> Result<Vec<TestResult>, RunBatchError> {
        self.execute_with_progress(sentences, &NoProgress)
            .await
            .map(|run| run.results)
    }

    /// Execute a batch with progress notifications.
    ///
    /// Dropping the returned future before it completes still releases the
    /// session: leftover requests are cancelled, the throwaway datasources
    /// deleted and the token signed out in the background.
    pub async fn execute_with_progress(
        &self,
        sentences: Vec<TestSentence>,
        progress: &dyn BatchProgressNotifier,
    ) -> Result<BatchRun, RunBatchError> {
        validate_batch(&sentences)?;

        let _guard = self.batch_lock.lock().await;

        info!(
            "Running batch of {} sentence(s) (async: {}, clear conversation: {})",
            sentences.len(),
            self.config.async_mode,
            self.config.clear_conversation
        );
        progress.on_batch_start(sentences.len());

        let mut session =
            Session::open(Arc::clone(&self.service), &self.config.credentials).await?;

        let outcome = self.run_in_session(&mut session, &sentences, progress).await;

        session.close().await;

        let results: Vec<TestResult> = outcome?
            .into_iter()
            .zip(&sentences)
            .map(|(result, sentence)| apply_validation(sentence, result))
            .collect();

        let report = BatchReport::new(&sentences, &results);
        info!(
            "Batch finished: {} passed, {} failed, processing time min/max/avg {}/{}/{:.2} ms",
            report.stats.passed,
            report.stats.failed,
            report.stats.min_processing_ms,
            report.stats.max_processing_ms,
            report.stats.avg_processing_ms
        );
        progress.on_report(&report);

        Ok(BatchRun { results, report })
    }

    async fn run_in_session(
        &self,
        session: &mut Session<S>,
        sentences: &[TestSentence],
        progress: &dyn BatchProgressNotifier,
    ) -> Result<Vec<TestResult>, RunBatchError> {
        session.provision_all(sentences, progress).await?;
        debug!("{} throwaway datasource(s) provisioned", session.resources().len());

        let token = session.token();
        let targets = self
            .resolve_targets(token, sentences, session.resources())
            .await?;
        let plan = dispatch::plan(&targets, &self.config);
        debug!("Dispatch plan: {} wave(s)", plan.waves.len());

        let engine = PollingEngine::new(session.service(), token, session.in_flight(), &self.config);
        let mut correlator = Correlator::new(sentences.len());

        for wave in &plan.waves {
            self.clear_conversations(token, wave).await?;

            let items: Vec<WaveItem<'_>> = wave
                .sentences
                .iter()
                .map(|&index| WaveItem {
                    index,
                    text: sentences[index].text(),
                    datasource_id: targets[index].datasource_id,
                })
                .collect();

            for (index, outcome) in engine.run_wave(&items, progress).await? {
                correlator.record(index, outcome)?;
            }
        }

        correlator.finish(sentences, &targets)
    }

    /// Resolves every sentence to the datasource it is sent to and the model
    /// behind it.
    async fn resolve_targets(
        &self,
        token: &AccessToken,
        sentences: &[TestSentence],
        resources: &EphemeralResources,
    ) -> Result<Vec<ResolvedTarget>, RunBatchError> {
        let models = self.existing_datasource_models(token, sentences).await?;

        sentences
            .iter()
            .map(|sentence| match sentence.target() {
                SentenceTarget::Model(model_id) => resources
                    .get(model_id)
                    .map(|datasource_id| ResolvedTarget {
                        datasource_id,
                        model_id: Some(model_id.clone()),
                    })
                    .ok_or_else(|| RunBatchError::MissingDatasource {
                        model_id: model_id.clone(),
                    }),
                SentenceTarget::Datasource(datasource_id) => Ok(ResolvedTarget {
                    datasource_id: *datasource_id,
                    model_id: models.get(datasource_id).cloned(),
                }),
            })
            .collect()
    }

    /// Model of each existing datasource, looked up only when the batch
    /// targets one.
    async fn existing_datasource_models(
        &self,
        token: &AccessToken,
        sentences: &[TestSentence],
    ) -> Result<HashMap<DatasourceId, String>, RunBatchError> {
        if sentences.iter().all(|s| s.datasource_id().is_none()) {
            return Ok(HashMap::new());
        }

        let listing = self
            .service
            .list_datasources(token)
            .await
            .map_err(RunBatchError::DatasourceLookup)?;

        Ok(listing.into_iter().map(|ds| (ds.id, ds.model_id)).collect())
    }

    async fn clear_conversations(
        &self,
        token: &AccessToken,
        wave: &Wave,
    ) -> Result<(), RunBatchError> {
        for &datasource_id in &wave.clear {
            self.service
                .clear_conversation(token, datasource_id)
                .await
                .map_err(|source| RunBatchError::ClearConversation {
                    datasource_id,
                    source,
                })?;
            info!("Conversation cleared for datasource: {}", datasource_id);
        }
        Ok(())
    }
}
