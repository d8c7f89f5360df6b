//! Configuration error types.

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// No credential was supplied explicitly or through the environment
    #[display("Missing credential for {}: pass an api key or set {}", provider, env_var)]
    MissingCredential {
        /// Canonical provider id
        provider: String,
        /// Environment variable that was consulted
        env_var: String,
    },
    /// Provider alias does not name a supported backend
    #[display("Unsupported provider '{}'", _0)]
    UnsupportedProvider(String),
    /// Configuration source could not be read or parsed
    #[display("Invalid configuration: {}", _0)]
    Invalid(String),
    /// Adapter options failed validation
    #[display("Invalid options: {}", _0)]
    InvalidOptions(String),
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use textgen_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::UnsupportedProvider("mistral".to_string()));
/// assert!(format!("{}", err).contains("mistral"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
