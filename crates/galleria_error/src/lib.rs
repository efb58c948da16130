//! Error types for Galleria.
//!
//! This crate provides the foundation error types used throughout the Galleria workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use galleria_error::{GalleriaResult, StorageError, StorageErrorKind};
//!
//! fn fetch_counter() -> GalleriaResult<String> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable("connection refused".into())))?
//! }
//!
//! match fetch_counter() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod deletion;
mod error;
mod intake;
mod json;
mod session;
mod storage;
mod telegram;

pub use config::{ConfigError, ConfigErrorKind};
pub use deletion::{DeletionError, DeletionErrorKind};
pub use error::{GalleriaError, GalleriaErrorKind, GalleriaResult};
pub use intake::{IntakeError, IntakeErrorKind};
pub use json::{JsonError, RecordDirection};
pub use session::{SessionError, SessionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use telegram::TelegramError;
