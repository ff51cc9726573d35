use common::RequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeckoError {
    #[error("GeckoTerminal API error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("GeckoTerminal request failed: {0}")]
    Request(RequestError),

    #[error("Invalid token address: {0:?}")]
    InvalidAddress(String),
}

impl GeckoError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GeckoError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<RequestError> for GeckoError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Status { status, status_text } => GeckoError::Status { status, status_text },
            other => GeckoError::Request(other),
        }
    }
}
