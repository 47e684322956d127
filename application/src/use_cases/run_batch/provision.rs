//! Resource provisioner
//!
//! One throwaway datasource per distinct model of the batch, deleted again
//! when the batch ends.

use super::error::RunBatchError;
use crate::ports::nlp_service::NlpService;
use crate::ports::progress::BatchProgressNotifier;
use askbatch_domain::{AccessToken, DatasourceId, TestSentence};
use tracing::{error, info};

/// Datasources provisioned for the current batch, in creation order.
#[derive(Debug, Default)]
pub(crate) struct EphemeralResources {
    entries: Vec<(String, DatasourceId)>,
}

impl EphemeralResources {
    /// Distinct models of the batch, in order of first appearance.
    pub(crate) fn distinct_models(sentences: &[TestSentence]) -> Vec<&str> {
        let mut models: Vec<&str> = Vec::new();
        for model in sentences.iter().filter_map(|s| s.model_id()) {
            if !models.contains(&model) {
                models.push(model);
            }
        }
        models
    }

    /// Creates a datasource for every distinct model.
    ///
    /// Stops at the first failure; everything created so far stays recorded
    /// so [`teardown`](Self::teardown) still deletes it.
    pub(crate) async fn provision_all<S: NlpService + ?Sized>(
        &mut self,
        service: &S,
        token: &AccessToken,
        sentences: &[TestSentence],
        progress: &dyn BatchProgressNotifier,
    ) -> Result<(), RunBatchError> {
        for (ordinal, model_id) in Self::distinct_models(sentences).into_iter().enumerate() {
            let id = Self::provision(service, token, model_id, ordinal).await?;
            self.entries.push((model_id.to_string(), id));
            progress.on_datasource_provisioned(model_id, id);
        }
        Ok(())
    }

    async fn provision<S: NlpService + ?Sized>(
        service: &S,
        token: &AccessToken,
        model_id: &str,
        ordinal: usize,
    ) -> Result<DatasourceId, RunBatchError> {
        let name = format!("test-{}", ordinal);

        let id = service
            .create_datasource(token, model_id, &name)
            .await
            .map_err(|source| RunBatchError::Provision {
                model_id: model_id.to_string(),
                source,
            })?;

        info!("Temporary test datasource created: {} (model: {})", id, model_id);
        Ok(id)
    }

    /// Datasource provisioned for `model_id`, if any.
    pub(crate) fn get(&self, model_id: &str) -> Option<DatasourceId> {
        self.entries
            .iter()
            .find(|(model, _)| model == model_id)
            .map(|(_, id)| *id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Best-effort deletion of every provisioned datasource. A failed
    /// deletion is logged and the remaining ones are still attempted.
    ///
    /// Entries are removed one at a time, so an interrupted teardown leaves
    /// only the datasources it has not reached yet.
    pub(crate) async fn teardown<S: NlpService + ?Sized>(&mut self, service: &S, token: &AccessToken) {
        while !self.entries.is_empty() {
            let (model_id, id) = self.entries.remove(0);
            match service.delete_datasource(token, id).await {
                Ok(()) => info!("Temporary test datasource deleted: {}", id),
                Err(e) => error!(
                    "Failed to delete test datasource {} (model: {}): {}",
                    id, model_id, e
                ),
            }
        }
    }
}
