//! Error types for the textgen library.
//!
//! Every failure carries the file and line where it was raised. The three families
//! map onto how the generation pipeline treats them:
//!
//! - [`ConfigError`]: fatal, raised at resolution or construction time.
//! - [`TransportError`]: logged by the adapter and returned to the caller as-is.
//! - [`CacheStoreError`]: logged and suppressed by the cache gateway.

mod cache;
mod config;
mod transport;

pub use cache::{CacheStoreError, CacheStoreErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use transport::{RetryableError, TransportError, TransportErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum TextgenErrorKind {
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Provider transport error
    #[display("{}", _0)]
    Transport(TransportError),
    /// Cache store error
    #[display("{}", _0)]
    CacheStore(CacheStoreError),
}

/// Textgen error with kind discrimination.
#[derive(Debug)]
pub struct TextgenError(Box<TextgenErrorKind>);

impl TextgenError {
    /// Create a new error from a kind.
    pub fn new(kind: TextgenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TextgenErrorKind {
        &self.0
    }

    /// Returns the transport error if this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self.kind() {
            TextgenErrorKind::Transport(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the configuration error if this is one.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self.kind() {
            TextgenErrorKind::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for TextgenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Textgen Error: {}", self.0)
    }
}

impl std::error::Error for TextgenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            TextgenErrorKind::Config(e) => Some(e),
            TextgenErrorKind::Transport(e) => Some(e),
            TextgenErrorKind::CacheStore(e) => Some(e),
        }
    }
}

// Generic From implementation for any type that converts to TextgenErrorKind
impl<T> From<T> for TextgenError
where
    T: Into<TextgenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for textgen operations.
pub type TextgenResult<T> = std::result::Result<T, TextgenError>;
