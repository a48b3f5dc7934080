//! API client module
//!
//! HTTP client for the student records API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
