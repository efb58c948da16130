//! Chat input routing, independent of the Telegram transport.
//!
//! [`Router`] decides what an operator's text, photo or file means for their
//! album and which reply they get back. The teloxide handlers only deliver
//! those replies.

use crate::{AlbumAssembler, Confirmation, DeletionProtocol, IntakeOutcome, MediaDescriptor};
use derive_getters::Getters;
use galleria_core::UserId;
use galleria_error::{
    DeletionErrorKind, GalleriaError, GalleriaErrorKind, IntakeErrorKind, SessionError,
    SessionErrorKind,
};
use tracing::{debug, instrument, warn};

/// Human-readable reply for a failed operation.
pub fn operator_message(err: &GalleriaError) -> String {
    match err.kind() {
        GalleriaErrorKind::Session(e) => match &e.kind {
            SessionErrorKind::Unauthorized(_) => "❌ Not authorized.".to_string(),
            SessionErrorKind::NotReady(_) => "No album in progress, send /start_album first.".to_string(),
            SessionErrorKind::EmptyAlbum(_) => "Nothing to publish yet, send some media first.".to_string(),
            SessionErrorKind::InvalidCategory { .. } => "Unknown category.".to_string(),
        },
        GalleriaErrorKind::Deletion(e) => match &e.kind {
            DeletionErrorKind::NotFound(code) => format!("No album under {}.", code),
        },
        GalleriaErrorKind::Intake(e) => match &e.kind {
            IntakeErrorKind::DownloadFailed(detail) => format!("❌ Download failed: {}", detail),
            IntakeErrorKind::RelayFailed(detail) => format!("❌ Forward failed: {}", detail),
        },
        GalleriaErrorKind::Storage(e) => format!("❌ Store error: {}", e.kind),
        other => format!("❌ {}", other),
    }
}

fn session_message(err: SessionError) -> String {
    operator_message(&GalleriaError::from(err))
}

/// First reaction to an incoming file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaStart {
    /// The file cannot be taken; send this text and stop.
    Rejected(String),
    /// Go ahead with intake, optionally posting a status message first.
    Accepted {
        /// Status text to post now and edit once intake settles
        provisional: Option<String>,
    },
}

/// Replies produced by taking in one file.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MediaReply {
    /// Warnings sent as separate messages
    notices: Vec<String>,
    /// Final status, edited into the provisional message when there is one
    text: String,
}

/// Routes operator input to the album assembler and the deletion protocol.
pub struct Router {
    assembler: AlbumAssembler,
    deletions: DeletionProtocol,
}

impl Router {
    /// Route into `assembler` and `deletions`.
    pub fn new(assembler: AlbumAssembler, deletions: DeletionProtocol) -> Self {
        Self {
            assembler,
            deletions,
        }
    }

    /// Album assembler behind this router.
    pub fn assembler(&self) -> &AlbumAssembler {
        &self.assembler
    }

    /// Deletion protocol behind this router.
    pub fn deletions(&self) -> &DeletionProtocol {
        &self.deletions
    }

    /// Reply to a plain-text message.
    ///
    /// A pending deletion consumes the text before it can become a title.
    #[instrument(skip(self, text))]
    pub async fn route_text(&self, user: UserId, text: &str) -> String {
        match self.deletions.reply(user, text).await {
            Ok(Some(Confirmation::Deleted(code))) => format!("🗑 Deleted {}", code),
            Ok(Some(Confirmation::Cancelled(_))) => "Deletion cancelled.".to_string(),
            Ok(Some(Confirmation::Reprompt(_))) => "Please reply yes or no.".to_string(),
            Ok(None) => {
                let title = text.trim();
                match self.assembler.set_title(user, title) {
                    Ok(()) => format!(
                        "✅ Title: {}\n(/nav to change the category, or send media)",
                        title
                    ),
                    Err(e) => session_message(e),
                }
            }
            Err(e) => {
                warn!(user, error = %e, "Deletion failed");
                operator_message(&e)
            }
        }
    }

    /// Record a photo as the cover image. Returns a reply only on failure.
    pub fn route_photo(&self, user: UserId, file_id: &str) -> Option<String> {
        match self.assembler.add_cover_image(user, file_id) {
            Ok(()) => None,
            Err(e) => {
                debug!(user, "Photo without an open album");
                Some(session_message(e))
            }
        }
    }

    /// Decide whether a file can be taken and what to show while it is.
    pub fn media_start(&self, user: UserId, media: &MediaDescriptor) -> MediaStart {
        if !self.assembler.sessions().contains(user) {
            debug!(user, "Media without an open album");
            return MediaStart::Rejected(session_message(SessionError::new(
                SessionErrorKind::NotReady(user),
            )));
        }
        let provisional = self
            .assembler
            .intake()
            .needs_progress_notice()
            .then(|| format!("⏳ Downloading {}...", media.file_name));
        MediaStart::Accepted { provisional }
    }

    /// Take in a file and describe the result.
    #[instrument(skip(self, media), fields(message_id = media.message_id))]
    pub async fn route_media(&self, user: UserId, media: &MediaDescriptor) -> MediaReply {
        let mut notices = Vec::new();
        let text = match self.assembler.add_media(user, media).await {
            Ok(added) => {
                let name = &media.file_name;
                let mut text = match added.outcome() {
                    IntakeOutcome::Relayed(_) => format!("✈️ Saved to channel: {}", name),
                    IntakeOutcome::Downloaded(_) => format!("📥 Downloaded: {}", name),
                    IntakeOutcome::Inline(_) => format!("📄 Added: {}", name),
                    IntakeOutcome::Degraded { reason, .. } => {
                        notices.push(format!(
                            "❌ Forward failed (is the bot an administrator of the channel?)\n{}",
                            reason.kind
                        ));
                        format!("📄 Added: {}", name)
                    }
                };
                if *added.became_zip() {
                    text.push_str("\n📦 Set as the album archive");
                }
                text
            }
            Err(e) => {
                warn!(user, error = %e, "Media intake failed");
                operator_message(&e)
            }
        };
        MediaReply { notices, text }
    }

    /// Publish the user's album and describe the result.
    #[instrument(skip(self))]
    pub async fn route_end_album(&self, user: UserId) -> String {
        let snapshot = self.assembler.sessions().get(user);

        match self.assembler.finish(user).await {
            Ok(published) => {
                let (title, category) = snapshot
                    .map(|album| (album.title().clone(), album.category().clone()))
                    .unwrap_or_default();
                format!(
                    "🎉 Published\nCode: {}\nTitle: {}\nCategory: {}\n{}",
                    published.code(),
                    title,
                    category,
                    published.url()
                )
            }
            Err(e) => {
                warn!(user, error = %e, "Publish failed");
                match e.kind() {
                    GalleriaErrorKind::Session(_) => operator_message(&e),
                    _ => format!(
                        "{}\nThe album is kept, send /end_album to retry.",
                        operator_message(&e)
                    ),
                }
            }
        }
    }
}
