//! Album session error types.

/// Reasons an album session operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// Caller is not on the allow-list
    #[display("User {} is not authorized", _0)]
    Unauthorized(i64),
    /// Operation needs an open session and there is none
    #[display("No album in progress for user {}", _0)]
    NotReady(i64),
    /// Category index outside the configured list
    #[display("Category index {} out of range (have {})", index, available)]
    InvalidCategory {
        /// Requested index
        index: usize,
        /// Number of configured categories
        available: usize,
    },
    /// Album has neither cover images nor attachments
    #[display("Album for user {} has no media", _0)]
    EmptyAlbum(i64),
}

/// Session error with location tracking.
///
/// # Examples
///
/// ```
/// use galleria_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::NotReady(42));
/// assert_eq!(err.kind, SessionErrorKind::NotReady(42));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The kind of error that occurred
    pub kind: SessionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SessionError {
    /// Create a new session error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
