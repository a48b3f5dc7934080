//! Tragres Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Domain model and shared plumbing for the Tragres student-records client.
//!
//! # Overview
//!
//! - **Types**: students and their attendance and assignment collections,
//!   plus the request payloads the API accepts
//! - **Statistics**: attendance rate and completion tallies derived from the
//!   model on every render
//! - **Error Handling**: domain validation errors
//! - **Logging**: tracing subscriber setup shared by every binary
//!
//! # Example
//!
//! ```
//! use tragres_common::types::NewStudent;
//!
//! let draft = NewStudent::new("Ana Ray", "555-0100", "Math");
//! assert!(draft.validate().is_ok());
//! ```

pub mod error;
pub mod logging;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{DomainError, Result};
