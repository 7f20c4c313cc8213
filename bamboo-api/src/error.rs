//! Error types for Bamboo API operations

use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::Response;

/// Result type for Bamboo API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Bamboo API operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was empty; raised before any request is sent
    #[error("{0}")]
    Validation(String),

    /// The server answered with a status the operation does not accept
    #[error("{context} returned {status_text}")]
    UnexpectedStatus {
        /// What the operation was doing
        context: String,
        /// The status the server sent back
        status: StatusCode,
        /// Status line text as reported by the response
        status_text: String,
    },

    /// Network-level failure from the HTTP transport
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request path could not be resolved against the base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Authentication error
    #[error("Bamboo authentication error: {0}")]
    Auth(String),

    /// Configuration or secrets could not be loaded
    #[error(transparent)]
    Config(#[from] bamboo_core::Error),
}

impl Error {
    pub(crate) fn unexpected_status(context: impl Into<String>, response: &Response) -> Self {
        Error::UnexpectedStatus {
            context: context.into(),
            status: response.status(),
            status_text: response.status_text(),
        }
    }

    /// Whether this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Whether the server answered with an unaccepted status
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Error::UnexpectedStatus { .. })
    }

    /// The HTTP status behind this error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message() {
        let response = Response::new(StatusCode::NOT_FOUND, "");
        let err = Error::unexpected_status("List projects", &response);
        assert_eq!(err.to_string(), "List projects returned 404 Not Found");
        assert!(err.is_unexpected_status());
        assert!(!err.is_validation());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = Error::Validation("Project key cannot be an empty string".to_string());
        assert!(err.is_validation());
        assert!(err.status().is_none());
    }
}
