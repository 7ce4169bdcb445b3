use thiserror::Error;

/// Why a request to the arena server did not produce a usable payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint}: request failed: {reason}")]
    Network {
        endpoint: &'static str,
        reason: String,
    },
    #[error("{endpoint}: server answered HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint}: malformed payload: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiError::Network { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Malformed { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("automated play is running")]
    Busy,
    #[error("page is missing {0}")]
    Page(String),
}
