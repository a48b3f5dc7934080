//! HTTP API client for the student records server
//!
//! One attempt per call. Non-success statuses become
//! [`CliError::RequestFailed`] with the server's message; `204 No Content`
//! decodes to an empty value.

use crate::api::{endpoints, types};
use crate::config::Config;
use crate::error::{CliError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, warn};

/// API client for the student records server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client without a request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&Config::new(base_url))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_url().to_string(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env()?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the server answers at all
    ///
    /// Any HTTP response counts as reachable; only transport failures
    /// report `false`.
    pub async fn health_check(&self) -> bool {
        let url = endpoints::url(&self.base_url, &endpoints::students_path());

        match self.client.head(&url).send().await {
            Ok(response) => {
                debug!(%url, status = response.status().as_u16(), "API reachable");
                true
            }
            Err(err) => {
                debug!(%url, error = %err, "API unreachable");
                false
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// PUT without a body, as used by action endpoints like toggles
    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::PUT, path, None::<&()>).await
    }

    /// DELETE a resource; any success payload is discarded
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request::<(), IgnoredAny>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = endpoints::url(&self.base_url, path);
        debug!(%method, %url, "Sending API request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // An unreadable body is reported the same way as an undecodable one
            let body = response.bytes().await.unwrap_or_default();
            let message = types::error_message(&body);
            warn!(%method, %url, status = status.as_u16(), %message, "API request failed");
            return Err(CliError::request_failed(status.as_u16(), message));
        }

        if status == StatusCode::NO_CONTENT {
            return decode_empty();
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return decode_empty();
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Decode "no content" as JSON `null`, so `()` and `IgnoredAny` succeed
fn decode_empty<T: DeserializeOwned>() -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::Null)?)
}
