use reqwest::StatusCode;
use thiserror::Error;

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Main error type for the chat model provider
#[derive(Error, Debug)]
pub enum ModelError {
    /// The gateway refused the API key (401/403)
    #[error("authentication failed ({0}): {1}")]
    Authentication(StatusCode, String),

    /// The gateway rejected the request itself: unknown model, out-of-range option
    #[error("request rejected by gateway ({0}): {1}")]
    ConfigurationRejected(StatusCode, String),

    /// Any other non-success status
    #[error("unexpected status {0}: {1}")]
    UnexpectedStatus(StatusCode, String),

    /// Stream disconnected or yielded an unreadable event
    #[error("stream error: {0}")]
    Stream(String),

    /// Local configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The host could not resolve the named credential
    #[error("credential `{0}` is not available")]
    MissingCredential(String),

    /// A node parameter had the wrong shape
    #[error("invalid node parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Network-level failure, propagated unchanged
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ModelError {
    /// Classify a non-success gateway response
    pub fn from_status(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ModelError::Authentication(status, body)
            }
            s if s.is_client_error() => ModelError::ConfigurationRejected(status, body),
            _ => ModelError::UnexpectedStatus(status, body),
        }
    }

    /// Check if the error is a client error (caller must change something)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ModelError::Authentication(..)
                | ModelError::ConfigurationRejected(..)
                | ModelError::Configuration(_)
                | ModelError::MissingCredential(_)
                | ModelError::InvalidParameter { .. }
        )
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ModelError::Authentication(status, _)
            | ModelError::ConfigurationRejected(status, _)
            | ModelError::UnexpectedStatus(status, _) => Some(*status),
            ModelError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
