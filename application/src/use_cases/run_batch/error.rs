//! Batch-fatal errors

use crate::ports::nlp_service::ServiceError;
use askbatch_domain::{BatchError, DatasourceId};
use thiserror::Error;

/// Errors that abort a whole batch.
///
/// Per-sentence ask failures are not here: they are recorded on the
/// sentence's result and the batch carries on.
#[derive(Error, Debug)]
pub enum RunBatchError {
    #[error("Invalid batch: {0}")]
    InvalidBatch(#[from] BatchError),

    #[error("Sign-in failed: {0}")]
    Auth(#[source] ServiceError),

    #[error("Failed to create test datasource for model '{model_id}': {source}")]
    Provision {
        model_id: String,
        #[source]
        source: ServiceError,
    },

    #[error("No test datasource was provisioned for model '{model_id}'")]
    MissingDatasource { model_id: String },

    #[error("Failed to list datasources: {0}")]
    DatasourceLookup(#[source] ServiceError),

    #[error("Failed to clear conversation for datasource {datasource_id}: {source}")]
    ClearConversation {
        datasource_id: DatasourceId,
        #[source]
        source: ServiceError,
    },

    #[error("Status check failed: {0}")]
    Check(#[source] ServiceError),

    #[error("Timed out waiting for response: {budget_ms}")]
    Timeout { budget_ms: u64 },

    #[error("Result correlation failed: {0}")]
    Correlation(String),
}

impl RunBatchError {
    /// Whether the batch was rejected before any remote call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RunBatchError::InvalidBatch(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunBatchError::Timeout { .. })
    }
}
