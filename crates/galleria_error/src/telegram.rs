//! Telegram Bot API error types.

/// Error returned by a Telegram Bot API call, with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Telegram Error: {} at line {} in {}", message, line, file)]
pub struct TelegramError {
    /// The error reported by the Bot API client
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TelegramError {
    /// Create a new TelegramError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
