// lib/src/errors.rs

use thiserror::Error;

use models::ValidationError;

/// Every failure a LifeTrack command can surface. All of them carry a
/// message fit to show the patient as-is.
#[derive(Debug, Error)]
pub enum PhrError {
    /// Transport failure or non-2xx answer. `message` is the backend's own
    /// message when it sent one, otherwise the operation's fallback text.
    #[error("{message}")]
    Request { message: String, status: Option<u16> },

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The AI parser answered but could not produce a usable draft.
    #[error("{0}")]
    VoiceParse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You need to log in first")]
    NotLoggedIn,

    #[error("{0}")]
    Capture(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A newer request for the same view was issued before this one resolved.
    #[error("A newer request replaced this one")]
    Stale,

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PhrError>;

impl PhrError {
    /// A request failure with no status, e.g. a refused connection.
    pub fn request(message: impl Into<String>) -> Self {
        PhrError::Request { message: message.into(), status: None }
    }

    /// Replaces whatever a lower layer said with the fixed message of the
    /// composite operation that failed. Client-side kinds pass through.
    pub fn with_fallback(self, fallback: &str) -> Self {
        match self {
            PhrError::Request { status, .. } => PhrError::Request { message: fallback.to_string(), status },
            other => other,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            PhrError::Request { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PhrError {
    fn from(err: serde_json::Error) -> Self {
        PhrError::Session(format!("JSON processing error: {}", err))
    }
}

impl From<config::ConfigError> for PhrError {
    fn from(err: config::ConfigError) -> Self {
        PhrError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_replaces_request_messages_only() {
        let err = PhrError::Request { message: "connection refused".to_string(), status: Some(502) };
        let err = err.with_fallback("Failed to fetch visited doctors");
        assert_eq!(err.to_string(), "Failed to fetch visited doctors");
        assert_eq!(err.status(), Some(502));

        let err = PhrError::InvalidCredentials.with_fallback("Login failed. Please try again.");
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn validation_messages_pass_through() {
        let err: PhrError = ValidationError::MissingDiagnosis.into();
        assert_eq!(err.to_string(), "Diagnosis is required. Please fill in the diagnosis field.");
    }
}
