use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("request failed with status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("could not decode the response body")]
    Decode(#[source] reqwest::Error),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}
