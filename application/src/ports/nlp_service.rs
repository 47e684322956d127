//! NLP service port
//!
//! Defines the remote question-answering service as seen by the batch
//! runner. Implementations (adapters) live in the infrastructure layer.

use askbatch_domain::{
    AccessToken, Credentials, DatasourceId, DatasourceInfo, RequestId, RequestState,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by every service call.
///
/// A business-level rejection is kept apart from a response the client
/// could not make sense of.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service understood the call and refused it.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The response was missing fields, mistyped or not JSON at all.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Connection failure, timeout or unexpected HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, ServiceError::Rejected(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ServiceError::MalformedResponse(_))
    }
}

/// Remote NLP service
#[async_trait]
pub trait NlpService: Send + Sync {
    /// Open a session
    async fn signin(&self, credentials: &Credentials) -> Result<AccessToken, ServiceError>;

    /// Invalidate a session
    async fn signout(&self, token: &AccessToken) -> Result<(), ServiceError>;

    /// Create a datasource bound to `model_id`
    async fn create_datasource(
        &self,
        token: &AccessToken,
        model_id: &str,
        name: &str,
    ) -> Result<DatasourceId, ServiceError>;

    async fn delete_datasource(
        &self,
        token: &AccessToken,
        datasource_id: DatasourceId,
    ) -> Result<(), ServiceError>;

    /// All datasources visible to the session, with their models
    async fn list_datasources(&self, token: &AccessToken)
    -> Result<Vec<DatasourceInfo>, ServiceError>;

    /// Forget the conversation context held for a datasource
    async fn clear_conversation(
        &self,
        token: &AccessToken,
        datasource_id: DatasourceId,
    ) -> Result<(), ServiceError>;

    /// Submit a sentence for asynchronous processing
    async fn ask(
        &self,
        token: &AccessToken,
        text: &str,
        datasource_id: DatasourceId,
    ) -> Result<RequestId, ServiceError>;

    /// States of all outstanding requests known for the session.
    ///
    /// May include requests submitted by anyone using the same account.
    async fn check(&self, token: &AccessToken) -> Result<Vec<RequestState>, ServiceError>;

    async fn cancel(&self, token: &AccessToken, ids: &[RequestId]) -> Result<(), ServiceError>;
}
