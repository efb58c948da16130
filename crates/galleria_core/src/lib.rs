//! Core data types for Galleria.
//!
//! An [`Album`] is the unit of publication: a titled, categorized bundle of cover
//! images and [`Attachment`]s, optionally password-protected. Once published it is
//! stored under a short sequential [`Code`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod album;
mod attachment;
mod category;
mod code;

pub use album::Album;
pub use attachment::{ARCHIVE_EXTENSIONS, Attachment, RelayTag, is_archive_name};
pub use category::{Categories, DEFAULT_CATEGORIES};
pub use code::Code;

/// Telegram user identity.
pub type UserId = i64;
