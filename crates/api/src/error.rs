use reqwest::StatusCode;
use thiserror::Error;

/// Shown when no token is available for an authenticated call.
pub const UNAUTHORIZED_MESSAGE: &str = "You are not signed in or your session has expired.";
/// Shown when the API cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Cannot reach the server. Please try again.";

/// Errors surfaced by the API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(#[source] reqwest::Error),

    /// Non-2xx response; `message` is the server's own text when it sent one.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("unexpected response from the server: {0}")]
    Decode(String),

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Text suitable for a flash message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the caller should be sent back to the login page.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::Unauthorized => true,
            ApiError::Status { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
