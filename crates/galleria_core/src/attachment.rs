//! Durable references to non-cover media.

use serde::{Deserialize, Serialize};

/// File name suffixes that mark an attachment as the album's downloadable archive.
pub const ARCHIVE_EXTENSIONS: [&str; 3] = [".zip", ".rar", ".7z"];

/// Returns `true` if `file_name` ends in one of [`ARCHIVE_EXTENSIONS`], ignoring case.
///
/// ```
/// use galleria_core::is_archive_name;
///
/// assert!(is_archive_name("Bundle.ZIP"));
/// assert!(is_archive_name("set.7z"));
/// assert!(!is_archive_name("clip.mp4"));
/// ```
pub fn is_archive_name(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ARCHIVE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Marker stored as `"type": "tg_link"` on relayed attachments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelayTag {
    /// Permanent link to a message in the relay channel
    #[default]
    #[serde(rename = "tg_link")]
    TgLink,
}

/// A reference to a video or document that can later be resolved to a viewable resource.
///
/// The published JSON carries no explicit discriminator beyond the fields each
/// variant owns, so variants are matched in declaration order when parsing:
/// `direct_url` identifies [`Attachment::Direct`], `tg_link` identifies
/// [`Attachment::Relay`], anything else with a `file_id` is [`Attachment::Inline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attachment {
    /// File materialized on a local download endpoint and served from a public URL.
    Direct {
        /// Provider file identifier
        file_id: String,
        /// Original file name
        file_name: String,
        /// MIME type reported by the provider
        mime_type: Option<String>,
        /// Publicly reachable download URL
        direct_url: String,
    },
    /// Message forwarded to the relay channel.
    Relay {
        /// Original file name
        file_name: String,
        /// Permanent link to the forwarded message
        tg_link: String,
        /// Variant marker
        #[serde(rename = "type")]
        kind: RelayTag,
    },
    /// Provider-issued transient file identifier, stored as-is.
    Inline {
        /// Provider file identifier
        file_id: String,
        /// Original file name
        file_name: String,
        /// MIME type reported by the provider
        mime_type: Option<String>,
    },
}

impl Attachment {
    /// Build an inline attachment.
    pub fn inline(
        file_id: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: Option<String>,
    ) -> Self {
        Self::Inline {
            file_id: file_id.into(),
            file_name: file_name.into(),
            mime_type,
        }
    }

    /// Build a relayed attachment from its permanent locator.
    pub fn relay(file_name: impl Into<String>, tg_link: impl Into<String>) -> Self {
        Self::Relay {
            file_name: file_name.into(),
            tg_link: tg_link.into(),
            kind: RelayTag::TgLink,
        }
    }

    /// Build a direct-download attachment.
    pub fn direct(
        file_id: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: Option<String>,
        direct_url: impl Into<String>,
    ) -> Self {
        Self::Direct {
            file_id: file_id.into(),
            file_name: file_name.into(),
            mime_type,
            direct_url: direct_url.into(),
        }
    }

    /// File name of the referenced media.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Direct { file_name, .. }
            | Self::Relay { file_name, .. }
            | Self::Inline { file_name, .. } => file_name,
        }
    }

    /// Whether this attachment qualifies as the album's archive.
    pub fn is_archive(&self) -> bool {
        is_archive_name(self.file_name())
    }
}
