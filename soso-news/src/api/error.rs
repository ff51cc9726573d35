use common::RequestError;

#[derive(Debug, thiserror::Error)]
pub enum SosoError {
    #[error("SoSoValue API request failed: {0}")]
    Request(#[from] RequestError),

    #[error("SoSoValue API error: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SosoError {
    /// Upstream HTTP status, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            SosoError::Request(e) => e.status(),
            _ => None,
        }
    }
}
