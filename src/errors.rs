use crate::validation::FormErrors;
use axum::http::StatusCode;
use thiserror::Error;

/// Error returned by the backend service handlers.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failure talking to the REST backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("failed to initialise HTTP client: {0}")]
    Init(String),
}

/// Failure of an optimistic mutation. Local state has already been reconciled
/// (or left untouched) by the time this is returned.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("activity form has invalid fields")]
    Invalid(FormErrors),

    #[error("create failed: {0}")]
    Create(#[source] ClientError),

    #[error("delete failed: {0}")]
    Delete(#[source] ClientError),

    #[error("prize save failed: {failed} of {total} requests did not succeed")]
    PrizeSave { failed: usize, total: usize },

    #[error("refresh failed: {0}")]
    Refresh(#[source] ClientError),

    #[error("no prize edit session is open")]
    NotEditing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("backend not responding after {attempts} attempts")]
    Unreachable { attempts: u32 },
}

#[derive(Debug, Error)]
pub enum BootError {
    #[error(transparent)]
    Unreachable(#[from] ProbeError),

    #[error("initial load failed: {0}")]
    Load(#[from] ClientError),
}
