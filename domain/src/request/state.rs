//! Request state value objects

use crate::core::ids::{DatasourceId, RequestId};
use crate::testing::result::QueryResult;
use serde::{Deserialize, Serialize};

/// Processing status of an ask request.
///
/// Only [`RequestStatus::Ready`] is terminal; every other wire value is kept
/// verbatim for logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Ready,
    Pending(String),
}

impl RequestStatus {
    /// Wire value of the terminal status.
    pub const READY: &'static str = "QRY_READY";

    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Ready => Self::READY,
            RequestStatus::Pending(s) => s,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RequestStatus::Ready)
    }
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        if s == Self::READY {
            RequestStatus::Ready
        } else {
            RequestStatus::Pending(s)
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remote-reported record of one ask request.
///
/// Timestamps are epoch milliseconds as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestState {
    pub request_id: RequestId,
    pub datasource_id: DatasourceId,
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub create_timestamp: i64,
    pub update_timestamp: i64,
}

impl RequestState {
    /// Creates a state record with no result and no error.
    pub fn new(
        request_id: impl Into<RequestId>,
        datasource_id: DatasourceId,
        status: impl Into<RequestStatus>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            datasource_id,
            status: status.into(),
            result_type: None,
            result_body: None,
            error: None,
            create_timestamp: 0,
            update_timestamp: 0,
        }
    }

    pub fn with_result(mut self, result_type: impl Into<String>, body: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self.result_body = Some(body.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_timestamps(mut self, created: i64, updated: i64) -> Self {
        self.create_timestamp = created;
        self.update_timestamp = updated;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    /// Remote processing time, `update - create`. Clock skew never yields a
    /// negative value.
    pub fn processing_time_ms(&self) -> u64 {
        u64::try_from(self.update_timestamp.saturating_sub(self.create_timestamp)).unwrap_or(0)
    }

    /// View handed to result validation predicates.
    pub fn query_result(&self) -> QueryResult {
        QueryResult {
            result_type: self.result_type.clone(),
            result_body: self.result_body.clone(),
        }
    }
}

/// Datasource listing entry: which model a datasource is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceInfo {
    pub id: DatasourceId,
    pub model_id: String,
}
