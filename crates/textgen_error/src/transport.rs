//! Transport error types and retry classification.

/// Failures raised while talking to a provider backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Request could not be sent or the connection failed
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Backend answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error text
        message: String,
    },
    /// Backend rejected the call because of rate limiting
    #[display("Rate limit exceeded: {}", _0)]
    RateLimited(String),
    /// Request body could not be encoded
    #[display("Request encoding failed: {}", _0)]
    Encode(String),
    /// Response body was not the expected shape
    #[display("Response parsing failed: {}", _0)]
    Parse(String),
}

impl TransportErrorKind {
    /// Check if this error type should be retried by a caller policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            TransportErrorKind::RateLimited(_) | TransportErrorKind::Http(_) => true,
            TransportErrorKind::Encode(_) | TransportErrorKind::Parse(_) => false,
        }
    }
}

/// Transport error with location tracking and the provider that raised it.
///
/// # Examples
///
/// ```
/// use textgen_error::{RetryableError, TransportError, TransportErrorKind};
///
/// let err = TransportError::new(
///     "openai",
///     TransportErrorKind::Api { status: 503, message: "overloaded".to_string() },
/// );
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("overloaded"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error ({}): {} at line {} in {}", provider, kind, line, file)]
pub struct TransportError {
    /// Canonical id of the provider the call was made to
    pub provider: &'static str,
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new transport error with automatic location tracking.
    #[track_caller]
    pub fn new(provider: &'static str, kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            provider,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TransportErrorKind {
        &self.kind
    }
}

/// Trait for errors that support retry logic.
///
/// Nothing in this workspace retries on its own; callers use this to drive their
/// own policy.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for TransportError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
