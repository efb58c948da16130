//! Deletion protocol error types.

/// Reasons a delete request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DeletionErrorKind {
    /// No published record exists under the code
    #[display("No album published under code '{}'", _0)]
    NotFound(String),
}

/// Deletion error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Deletion Error: {} at line {} in {}", kind, line, file)]
pub struct DeletionError {
    /// The kind of error that occurred
    pub kind: DeletionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DeletionError {
    /// Create a new deletion error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DeletionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
