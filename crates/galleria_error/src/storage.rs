//! Key-value storage error types.

/// Kinds of key-value storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// The store rejected or failed a write
    #[display("Failed to write key '{}': {}", key, reason)]
    WriteFailed {
        /// Key being written
        key: String,
        /// Reason reported by the backend
        reason: String,
    },
    /// The store failed to answer a read (distinct from an absent key)
    #[display("Failed to read key '{}': {}", key, reason)]
    ReadFailed {
        /// Key being read
        key: String,
        /// Reason reported by the backend
        reason: String,
    },
    /// The store rejected or failed a delete
    #[display("Failed to delete key '{}': {}", key, reason)]
    DeleteFailed {
        /// Key being deleted
        key: String,
        /// Reason reported by the backend
        reason: String,
    },
    /// The counter entry holds something other than a decimal integer
    #[display("Counter value is not a number: {}", _0)]
    CounterCorrupt(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use galleria_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::CounterCorrupt("abc".to_string()));
/// assert!(format!("{}", err).contains("not a number"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
