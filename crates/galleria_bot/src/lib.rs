//! Telegram front end for Galleria.
//!
//! Operators assemble an [`Album`](galleria_core::Album) through a sequence of
//! chat messages and publish it with `/end_album`. The crate is split into:
//!
//! - [`AlbumAssembler`]: per-user session lifecycle, delegating media to
//!   [`MediaIntake`] and finished albums to the publishing pipeline
//! - [`DeletionProtocol`]: two-step yes/no confirmation for deleting records
//! - [`Router`]: turns text, photos and files into album changes and replies
//! - [`GalleriaBot`]: teloxide dispatcher translating updates into the above
//!
//! Everything except [`GalleriaBot`] and the teloxide adapters in this crate is
//! independent of Telegram and can be driven directly in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod assembler;
mod client;
mod command;
mod config;
mod deletion;
mod handler;
mod intake;
mod keyboard;
mod router;
mod session;
mod telegram;

pub use access::AccessControl;
pub use assembler::{AddedMedia, AlbumAssembler};
pub use client::GalleriaBot;
pub use command::Command;
pub use config::{CategorySetting, GalleriaConfig, IntakeConfig, PublishConfig, TelegramConfig};
pub use deletion::{Confirmation, DeletionProtocol, DeletionState, PendingDeletions};
pub use intake::{
    FileMaterializer, IntakeMode, IntakeOutcome, IntakeStrategy, MediaDescriptor, MediaIntake,
    MediaKind, MessageRelay, direct_url, relay_locator,
};
pub use keyboard::{category_rows, parse_category_callback};
pub use router::{MediaReply, MediaStart, Router, operator_message};
pub use session::SessionStore;
pub use telegram::{BotApiMaterializer, BotRelay, relative_file_path};
