//! Album assembly sessions.

use crate::{IntakeOutcome, MediaDescriptor, MediaIntake, SessionStore};
use derive_getters::Getters;
use galleria_core::{Album, Categories, UserId};
use galleria_error::{GalleriaResult, SessionError, SessionErrorKind};
use galleria_storage::{Published, Publisher};
use tracing::{debug, info, instrument, warn};

/// Result of adding a video or document to an album.
#[derive(Debug, Clone, Getters)]
pub struct AddedMedia {
    outcome: IntakeOutcome,
    became_zip: bool,
}

/// Owns every operator's in-progress album and drives it to publication.
///
/// All operations except [`begin`](Self::begin) require an open session and fail
/// with [`SessionErrorKind::NotReady`] otherwise, leaving state untouched.
pub struct AlbumAssembler {
    sessions: SessionStore,
    intake: MediaIntake,
    publisher: Publisher,
    categories: Categories,
    default_title: String,
}

impl AlbumAssembler {
    /// Create an assembler.
    pub fn new(
        intake: MediaIntake,
        publisher: Publisher,
        categories: Categories,
        default_title: impl Into<String>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            intake,
            publisher,
            categories,
            default_title: default_title.into(),
        }
    }

    /// Open sessions.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Configured category labels.
    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Media intake in use.
    pub fn intake(&self) -> &MediaIntake {
        &self.intake
    }

    /// Publishing pipeline in use.
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Start a fresh album for `user`, discarding any unpublished one.
    ///
    /// Returns the default category label.
    #[instrument(skip(self))]
    pub fn begin(&self, user: UserId) -> String {
        let category = self.categories.default_label().to_string();
        let album = Album::new(&self.default_title, &category);
        if let Some(previous) = self.sessions.begin(user, album) {
            warn!(
                discarded_title = %previous.title(),
                "Discarded unpublished album"
            );
        }
        category
    }

    /// Replace the album title.
    pub fn set_title(&self, user: UserId, title: &str) -> Result<(), SessionError> {
        self.with_album(user, |album| album.set_title(title))
    }

    /// Select the category at `index`, returning its label.
    pub fn set_category(&self, user: UserId, index: usize) -> Result<String, SessionError> {
        if !self.sessions.contains(user) {
            return Err(SessionError::new(SessionErrorKind::NotReady(user)));
        }
        let label = self
            .categories
            .get(index)
            .ok_or_else(|| {
                SessionError::new(SessionErrorKind::InvalidCategory {
                    index,
                    available: self.categories.len(),
                })
            })?
            .to_string();
        self.with_album(user, |album| album.set_category(&label))?;
        Ok(label)
    }

    /// Set the access password.
    pub fn set_password(&self, user: UserId, password: &str) -> Result<(), SessionError> {
        self.with_album(user, |album| album.set_password(password))
    }

    /// Append a cover image reference.
    pub fn add_cover_image(&self, user: UserId, file_id: &str) -> Result<(), SessionError> {
        self.with_album(user, |album| album.add_cover_image(file_id))
    }

    /// Current category label, if a session is open.
    pub fn current_category(&self, user: UserId) -> Option<String> {
        self.sessions.get(user).map(|album| album.category().clone())
    }

    /// Run `media` through intake and append the resulting attachment.
    ///
    /// The session is checked before and after intake; an album closed while
    /// intake was in flight is reported as [`SessionErrorKind::NotReady`].
    #[instrument(skip(self, media), fields(file_name = %media.file_name))]
    pub async fn add_media(
        &self,
        user: UserId,
        media: &MediaDescriptor,
    ) -> GalleriaResult<AddedMedia> {
        if !self.sessions.contains(user) {
            return Err(SessionError::new(SessionErrorKind::NotReady(user)).into());
        }

        let outcome = self.intake.intake(media).await?;
        let attachment = outcome.attachment().clone();

        let became_zip = self
            .sessions
            .mutate(user, |album| album.add_attachment(attachment))
            .ok_or_else(|| SessionError::new(SessionErrorKind::NotReady(user)))?;

        debug!(became_zip, "Added attachment");
        Ok(AddedMedia {
            outcome,
            became_zip,
        })
    }

    /// Publish the album and close the session.
    ///
    /// On failure the session is kept so the operator can retry.
    #[instrument(skip(self))]
    pub async fn finish(&self, user: UserId) -> GalleriaResult<Published> {
        let album = self
            .sessions
            .get(user)
            .ok_or_else(|| SessionError::new(SessionErrorKind::NotReady(user)))?;

        if !album.is_publishable() {
            return Err(SessionError::new(SessionErrorKind::EmptyAlbum(user)).into());
        }

        let published = self.publisher.publish(&album).await?;
        self.sessions.clear(user);
        info!(code = %published.code(), "Closed session after publish");
        Ok(published)
    }

    fn with_album(
        &self,
        user: UserId,
        f: impl FnOnce(&mut Album),
    ) -> Result<(), SessionError> {
        self.sessions
            .mutate(user, f)
            .ok_or_else(|| SessionError::new(SessionErrorKind::NotReady(user)))
    }
}
