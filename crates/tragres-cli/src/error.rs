//! Error types for the Tragres CLI
//!
//! Every error is user-facing: the message is printed as-is when a command
//! fails and is reused as the description of error notices.

use thiserror::Error;
use tragres_common::DomainError;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The server answered with a non-success status
    #[error("{message} (HTTP {status})")]
    RequestFailed { status: u16, message: String },

    /// Required input was missing or malformed; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The server could not be reached or the response body was unreadable
    #[error("Network request failed: {0}. Check that the API server is running and TRAGRES_API_URL is correct.")]
    Http(#[from] reqwest::Error),

    /// A success response did not match the expected resource shape
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// No student with this id exists on the server
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// The connection check got no HTTP response at all
    #[error("Cannot reach the API server at {0}. Check that it is running and TRAGRES_API_URL is correct.")]
    Unreachable(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or command-line flags.")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status when the server rejected the request
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound(_)) || self.status() == Some(404)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
