//! The in-progress and published album.

use crate::Attachment;
use derive_getters::Getters;
use galleria_error::JsonError;
use serde::{Deserialize, Serialize};

/// A titled, categorized bundle of cover images and attachments.
///
/// Serializes to the record shape the public gallery reads:
///
/// ```json
/// { "title": "...", "category": "...", "files": ["..."],
///   "attachments": [ ... ], "zip": null, "password": null }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Album {
    title: String,
    category: String,
    files: Vec<String>,
    attachments: Vec<Attachment>,
    #[serde(rename = "zip")]
    zip_ref: Option<Attachment>,
    password: Option<String>,
}

impl Album {
    /// Start an empty album.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            files: Vec::new(),
            attachments: Vec::new(),
            zip_ref: None,
            password: None,
        }
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the category label.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Set the access password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(password.into());
    }

    /// Append a cover/preview image reference.
    pub fn add_cover_image(&mut self, file_id: impl Into<String>) {
        self.files.push(file_id.into());
    }

    /// Append an attachment, recording it as the archive if it is the first archive seen.
    ///
    /// Returns `true` when the attachment became the album's archive.
    ///
    /// ```
    /// use galleria_core::{Album, Attachment};
    ///
    /// let mut album = Album::new("Set", "Travel");
    /// assert!(album.add_attachment(Attachment::inline("f1", "one.zip", None)));
    /// assert!(!album.add_attachment(Attachment::inline("f2", "two.rar", None)));
    /// assert_eq!(album.zip_ref().as_ref().map(|a| a.file_name()), Some("one.zip"));
    /// ```
    pub fn add_attachment(&mut self, attachment: Attachment) -> bool {
        let becomes_zip = self.zip_ref.is_none() && attachment.is_archive();
        if becomes_zip {
            self.zip_ref = Some(attachment.clone());
        }
        self.attachments.push(attachment);
        becomes_zip
    }

    /// An album can be published once it holds at least one image or attachment.
    pub fn is_publishable(&self) -> bool {
        !self.files.is_empty() || !self.attachments.is_empty()
    }

    /// Encode as the published JSON record.
    pub fn to_json(&self) -> Result<String, JsonError> {
        serde_json::to_string(self).map_err(|e| JsonError::encode(e.to_string()))
    }

    /// Decode a published JSON record.
    pub fn from_json(raw: &str) -> Result<Self, JsonError> {
        serde_json::from_str(raw).map_err(|e| JsonError::decode(e.to_string()))
    }
}
