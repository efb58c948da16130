//! Media intake error types.

/// Upstream failures while turning a media message into an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum IntakeErrorKind {
    /// Forwarding into the relay channel failed
    #[display("Relay forward failed: {}", _0)]
    RelayFailed(String),
    /// The local download endpoint could not materialize the file
    #[display("Download failed: {}", _0)]
    DownloadFailed(String),
}

/// Intake error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Intake Error: {} at line {} in {}", kind, line, file)]
pub struct IntakeError {
    /// The kind of error that occurred
    pub kind: IntakeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IntakeError {
    /// Create a new intake error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IntakeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
