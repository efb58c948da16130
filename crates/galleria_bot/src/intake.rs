//! Turning inbound video and document messages into attachments.
//!
//! One [`IntakeStrategy`] is active per deployment:
//!
//! - **Inline**: keep the Bot API file id as is
//! - **Relay**: forward into a relay channel and keep the permanent message link,
//!   degrading to inline for that message if the forward fails
//! - **Direct**: have a local Bot API server download the file into its cache
//!   directory and publish the file under a public root
//!
//! The Direct variant writes into the cache directory that
//! `galleria_cache::CacheReclaimer` evicts from.

use async_trait::async_trait;
use galleria_core::Attachment;
use galleria_error::IntakeError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Which intake strategy a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum IntakeMode {
    /// Bot API file id references
    Inline,
    /// Relay channel message links
    Relay,
    /// Locally downloaded files served from a public root
    Direct,
}

/// Kind of inbound media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// A video message
    Video,
    /// A document (any file)
    Document,
}

impl MediaKind {
    /// Name used when the message carries none.
    pub fn default_file_name(self) -> &'static str {
        match self {
            MediaKind::Video => "video.mp4",
            MediaKind::Document => "file",
        }
    }
}

/// An inbound video or document message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    /// Chat the message arrived in
    pub chat_id: i64,
    /// Message id within that chat
    pub message_id: i32,
    /// Bot API file id
    pub file_id: String,
    /// File name, defaulted by kind when the message has none
    pub file_name: String,
    /// MIME type, if reported
    pub mime_type: Option<String>,
    /// Video or document
    pub kind: MediaKind,
}

impl MediaDescriptor {
    /// Describe a media message, filling in the default file name.
    pub fn new(
        chat_id: i64,
        message_id: i32,
        file_id: impl Into<String>,
        file_name: Option<String>,
        mime_type: Option<String>,
        kind: MediaKind,
    ) -> Self {
        let file_name = file_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| kind.default_file_name().to_string());
        Self {
            chat_id,
            message_id,
            file_id: file_id.into(),
            file_name,
            mime_type,
            kind,
        }
    }

    fn inline_attachment(&self) -> Attachment {
        Attachment::inline(&self.file_id, &self.file_name, self.mime_type.clone())
    }
}

/// Forwards a message into another chat.
#[async_trait]
pub trait MessageRelay: Send + Sync {
    /// Forward message `message_id` of `from_chat` into `relay_chat`,
    /// returning the id of the copy in `relay_chat`.
    async fn forward(
        &self,
        relay_chat: i64,
        from_chat: i64,
        message_id: i32,
    ) -> Result<i32, IntakeError>;
}

/// Downloads a file to local storage.
#[async_trait]
pub trait FileMaterializer: Send + Sync {
    /// Download `file_id`, returning its path relative to the public root.
    async fn materialize(&self, file_id: &str) -> Result<String, IntakeError>;
}

/// Permanent link to a relayed message: `<prefix>/<message_id>`.
pub fn relay_locator(link_prefix: &str, message_id: i32) -> String {
    format!("{}/{}", link_prefix.trim_end_matches('/'), message_id)
}

/// Public URL of a downloaded file: `<root>/bot<credential>/<relative_path>`.
pub fn direct_url(public_root: &str, credential: &str, relative_path: &str) -> String {
    format!(
        "{}/bot{}/{}",
        public_root.trim_end_matches('/'),
        credential,
        relative_path.trim_start_matches('/')
    )
}

/// Strategy configuration and its collaborators.
#[derive(Clone)]
pub enum IntakeStrategy {
    /// Keep the file id
    Inline,
    /// Forward into a relay channel
    Relay {
        /// Forwarding client
        relay: Arc<dyn MessageRelay>,
        /// Relay channel id
        channel_id: i64,
        /// Link prefix of the relay channel
        link_prefix: String,
    },
    /// Download through a local Bot API server
    Direct {
        /// Download client
        materializer: Arc<dyn FileMaterializer>,
        /// Public root serving the download cache
        public_root: String,
        /// Bot credential segment of the public path
        credential: String,
    },
}

impl IntakeStrategy {
    /// Mode of this strategy.
    pub fn mode(&self) -> IntakeMode {
        match self {
            IntakeStrategy::Inline => IntakeMode::Inline,
            IntakeStrategy::Relay { .. } => IntakeMode::Relay,
            IntakeStrategy::Direct { .. } => IntakeMode::Direct,
        }
    }
}

impl fmt::Debug for IntakeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeStrategy::Inline => f.write_str("Inline"),
            IntakeStrategy::Relay {
                channel_id,
                link_prefix,
                ..
            } => f
                .debug_struct("Relay")
                .field("channel_id", channel_id)
                .field("link_prefix", link_prefix)
                .finish_non_exhaustive(),
            IntakeStrategy::Direct { public_root, .. } => f
                .debug_struct("Direct")
                .field("public_root", public_root)
                .finish_non_exhaustive(),
        }
    }
}

/// How a media message became an attachment.
#[derive(Debug, Clone)]
pub enum IntakeOutcome {
    /// Stored as a file id reference
    Inline(Attachment),
    /// Stored as a relay channel link
    Relayed(Attachment),
    /// Stored as a direct download URL
    Downloaded(Attachment),
    /// The relay forward failed and the file id was kept instead
    Degraded {
        /// The inline fallback
        attachment: Attachment,
        /// Why relaying failed
        reason: IntakeError,
    },
}

impl IntakeOutcome {
    /// The attachment to store.
    pub fn attachment(&self) -> &Attachment {
        match self {
            IntakeOutcome::Inline(a) | IntakeOutcome::Relayed(a) | IntakeOutcome::Downloaded(a) => {
                a
            }
            IntakeOutcome::Degraded { attachment, .. } => attachment,
        }
    }
}

/// Applies the configured [`IntakeStrategy`] to media messages.
#[derive(Debug, Clone)]
pub struct MediaIntake {
    strategy: IntakeStrategy,
}

impl MediaIntake {
    /// Create an intake using `strategy`.
    pub fn new(strategy: IntakeStrategy) -> Self {
        Self { strategy }
    }

    /// Inline references only.
    pub fn inline() -> Self {
        Self::new(IntakeStrategy::Inline)
    }

    /// Active mode.
    pub fn mode(&self) -> IntakeMode {
        self.strategy.mode()
    }

    /// Whether intake may take long enough to warrant a provisional status message.
    pub fn needs_progress_notice(&self) -> bool {
        self.mode() == IntakeMode::Direct
    }

    /// Produce an attachment for `media`.
    ///
    /// Relay failures degrade to an inline reference and are reported in the
    /// outcome. Download failures are returned as errors.
    #[instrument(skip(self, media), fields(mode = %self.mode(), file_name = %media.file_name))]
    pub async fn intake(&self, media: &MediaDescriptor) -> Result<IntakeOutcome, IntakeError> {
        match &self.strategy {
            IntakeStrategy::Inline => Ok(IntakeOutcome::Inline(media.inline_attachment())),
            IntakeStrategy::Relay {
                relay,
                channel_id,
                link_prefix,
            } => match relay
                .forward(*channel_id, media.chat_id, media.message_id)
                .await
            {
                Ok(relay_message_id) => {
                    let locator = relay_locator(link_prefix, relay_message_id);
                    debug!(locator = %locator, "Relayed media");
                    Ok(IntakeOutcome::Relayed(Attachment::relay(
                        &media.file_name,
                        locator,
                    )))
                }
                Err(reason) => {
                    warn!(error = %reason, "Relay forward failed, keeping file id");
                    Ok(IntakeOutcome::Degraded {
                        attachment: media.inline_attachment(),
                        reason,
                    })
                }
            },
            IntakeStrategy::Direct {
                materializer,
                public_root,
                credential,
            } => {
                let relative = materializer.materialize(&media.file_id).await?;
                debug!(relative_path = %relative, "Downloaded media");
                Ok(IntakeOutcome::Downloaded(Attachment::direct(
                    &media.file_id,
                    &media.file_name,
                    media.mime_type.clone(),
                    direct_url(public_root, credential, &relative),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_by_kind() {
        let video = MediaDescriptor::new(1, 2, "f", None, None, MediaKind::Video);
        assert_eq!(video.file_name, "video.mp4");
        let doc = MediaDescriptor::new(1, 2, "f", Some(String::new()), None, MediaKind::Document);
        assert_eq!(doc.file_name, "file");
        let named = MediaDescriptor::new(1, 2, "f", Some("a.zip".into()), None, MediaKind::Document);
        assert_eq!(named.file_name, "a.zip");
    }

    #[test]
    fn locator_joins_prefix_and_id() {
        assert_eq!(
            relay_locator("https://t.me/c/3404008241", 57),
            "https://t.me/c/3404008241/57"
        );
        assert_eq!(relay_locator("https://t.me/c/1/", 3), "https://t.me/c/1/3");
    }

    #[test]
    fn direct_url_layout() {
        assert_eq!(
            direct_url("https://files.example.org/", "123:ABC", "/documents/file_4.zip"),
            "https://files.example.org/bot123:ABC/documents/file_4.zip"
        );
    }

    #[test]
    fn debug_hides_credential() {
        struct Never;
        #[async_trait]
        impl FileMaterializer for Never {
            async fn materialize(&self, _file_id: &str) -> Result<String, IntakeError> {
                unreachable!()
            }
        }
        let strategy = IntakeStrategy::Direct {
            materializer: Arc::new(Never),
            public_root: "https://files.example.org".into(),
            credential: "123:SECRET".into(),
        };
        assert!(!format!("{:?}", strategy).contains("SECRET"));
        assert!(MediaIntake::new(strategy).needs_progress_notice());
    }
}
