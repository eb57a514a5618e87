// Client error types
use thiserror::Error;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Errors surfaced by the API client and its helpers
#[derive(Debug, Error)]
pub enum ClientError {
    // The backend answered 401; the token has already been cleared
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Invalid request target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn invalid_target(target: &str, reason: impl Into<String>) -> Self {
        ClientError::InvalidTarget {
            target: target.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }

    /// HTTP status attached to the error, when there is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::SessionExpired => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::SessionExpired => "SESSION_EXPIRED",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::InvalidTarget { .. } => "INVALID_TARGET",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Json(_) => "INVALID_JSON",
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_message_is_fixed() {
        assert_eq!(ClientError::SessionExpired.to_string(), SESSION_EXPIRED_MESSAGE);
        assert_eq!(ClientError::SessionExpired.status_code(), Some(401));
    }

    #[test]
    fn api_error_displays_message_only() {
        let err = ClientError::api(422, "Email already registered");
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(err.status_code(), Some(422));
        assert_eq!(err.error_code(), "API_ERROR");
    }
}
