//! Error types for the Tragres domain

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, DomainError>;

/// Validation failures detected before anything is sent to the server
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl DomainError {
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }
}
