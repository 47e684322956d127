//! Error types for the REST adapter

use askbatch_application::ServiceError;
use thiserror::Error;

/// Errors raised while talking to the REST endpoint
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 400, the body is the service's explanation
    #[error("{0}")]
    BadRequest(String),

    #[error("Unexpected response [code={code}, text={text}]")]
    UnexpectedResponse { code: u16, text: String },

    #[error("Unexpected empty response [code={code}]")]
    EmptyResponse { code: u16 },

    #[error("Unexpected message status: {0}")]
    UnexpectedStatus(String),

    #[error("Missed expected field: {0}")]
    MissingField(&'static str),

    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl From<RestError> for ServiceError {
    fn from(err: RestError) -> Self {
        let message = err.to_string();
        match err {
            RestError::BadRequest(_) | RestError::UnexpectedStatus(_) => {
                ServiceError::Rejected(message)
            }
            RestError::EmptyResponse { .. }
            | RestError::MissingField(_)
            | RestError::InvalidBody(_) => ServiceError::MalformedResponse(message),
            RestError::Http(_)
            | RestError::UnexpectedResponse { .. }
            | RestError::InvalidBaseUrl(_) => ServiceError::Transport(message),
        }
    }
}
