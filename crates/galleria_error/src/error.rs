//! Top-level error wrapper types.

use crate::{
    ConfigError, DeletionError, IntakeError, JsonError, SessionError, StorageError, TelegramError,
};

/// Every error condition a Galleria operation can surface.
///
/// # Examples
///
/// ```
/// use galleria_error::{GalleriaError, JsonError};
///
/// let err: GalleriaError = JsonError::decode("trailing characters").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GalleriaErrorKind {
    /// Album record JSON error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Key-value storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Album session error
    #[from(SessionError)]
    Session(SessionError),
    /// Media intake error
    #[from(IntakeError)]
    Intake(IntakeError),
    /// Deletion protocol error
    #[from(DeletionError)]
    Deletion(DeletionError),
    /// Telegram Bot API error
    #[from(TelegramError)]
    Telegram(TelegramError),
}

/// Galleria error with kind discrimination.
///
/// # Examples
///
/// ```
/// use galleria_error::{GalleriaResult, ConfigError};
///
/// fn might_fail() -> GalleriaResult<()> {
///     Err(ConfigError::invalid("publish.code_prefix", "must not be empty"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Galleria Error: {}", _0)]
pub struct GalleriaError(Box<GalleriaErrorKind>);

impl GalleriaError {
    /// Create a new error from a kind.
    pub fn new(kind: GalleriaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GalleriaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GalleriaErrorKind
impl<T> From<T> for GalleriaError
where
    T: Into<GalleriaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Galleria operations.
pub type GalleriaResult<T> = std::result::Result<T, GalleriaError>;
