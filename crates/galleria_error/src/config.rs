//! Configuration error types.

/// What is wrong with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A required setting is empty or unset
    #[display("{} is required", _0)]
    Missing(String),
    /// A setting is present but unusable
    #[display("{}: {}", key, reason)]
    Invalid {
        /// Dotted setting name, e.g. `intake.local_api_url`
        key: String,
        /// What is wrong with the value
        reason: String,
    },
    /// The layered sources could not be read or deserialized
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use galleria_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Missing("telegram.token".into()));
/// assert!(err.to_string().contains("telegram.token is required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
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

    /// Shorthand for [`ConfigErrorKind::Invalid`].
    #[track_caller]
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid {
            key: key.into(),
            reason: reason.into(),
        })
    }
}
