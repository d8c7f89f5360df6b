//! The remote-call boundary between adapters and vendor HTTP APIs.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use textgen_core::ProviderId;
use textgen_error::{TransportError, TransportErrorKind};
use tracing::{debug, error, instrument};

/// Default request timeout for [`HttpTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A fully built backend call: where to send it, extra headers, JSON body.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct TransportRequest {
    /// Absolute endpoint URL
    url: String,
    /// Extra headers, including credentials
    #[getter(skip)]
    headers: Vec<(String, String)>,
    /// JSON request body
    body: Value,
}

impl TransportRequest {
    /// Creates a request with no extra headers.
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends a native request and returns the native JSON response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the call.
    ///
    /// # Errors
    ///
    /// Network failures, non-success statuses and non-JSON bodies.
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportError>;
}

/// `reqwest`-backed transport posting JSON.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    provider: ProviderId,
}

impl HttpTransport {
    /// Creates a transport for `provider` with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns an HTTP transport error if the client cannot be built.
    #[instrument]
    pub fn new(provider: ProviderId, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TransportError::new(provider.as_str(), TransportErrorKind::Http(e.to_string()))
        })?;
        Ok(Self { client, provider })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(
        skip(self, request),
        fields(provider = self.provider.as_str(), url = %request.url())
    )]
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportError> {
        let provider = self.provider.as_str();
        let mut builder = self.client.post(request.url()).json(request.body());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| {
            error!(provider, error = ?e, "HTTP request failed");
            TransportError::new(
                provider,
                TransportErrorKind::Http(format!("Request failed: {}", e)),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(provider, status = %status, error = %error_text, "API error");
            let kind = if status.as_u16() == 429 {
                TransportErrorKind::RateLimited(error_text)
            } else {
                TransportErrorKind::Api {
                    status: status.as_u16(),
                    message: error_text,
                }
            };
            return Err(TransportError::new(provider, kind));
        }

        let body: Value = response.json().await.map_err(|e| {
            error!(provider, error = ?e, "Failed to parse response");
            TransportError::new(
                provider,
                TransportErrorKind::Parse(format!("Failed to parse JSON: {}", e)),
            )
        })?;
        debug!(provider, "Received response");
        Ok(body)
    }
}
