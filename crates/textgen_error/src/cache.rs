//! Cache store error types.

/// Kinds of cache store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheStoreErrorKind {
    /// Store backend is unavailable
    #[display("Cache store unavailable: {}", _0)]
    Unavailable(String),
    /// I/O error during a store operation
    #[display("I/O error: {}", _0)]
    Io(String),
    /// Entry could not be serialized or deserialized
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Cache store error with location tracking.
///
/// # Examples
///
/// ```
/// use textgen_error::{CacheStoreError, CacheStoreErrorKind};
///
/// let err = CacheStoreError::new(CacheStoreErrorKind::Unavailable("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Store Error: {} at line {} in {}", kind, line, file)]
pub struct CacheStoreError {
    /// The kind of error that occurred
    pub kind: CacheStoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheStoreError {
    /// Create a new cache store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheStoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CacheStoreErrorKind {
        &self.kind
    }
}
