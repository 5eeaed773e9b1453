use reqwest::StatusCode;

use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("bad response: {0}")]
    BadResponse(StatusCode),
    #[error("invalid payload: {0}")]
    InvalidPayload(Arc<serde_json::Error>),
}

impl Error {
    /// Returns `true` if the remote host could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::RequestFailed(error) => error.is_connect() || error.is_timeout(),
            Self::BadResponse(_) | Self::InvalidPayload(_) => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidPayload(Arc::new(error))
    }
}
