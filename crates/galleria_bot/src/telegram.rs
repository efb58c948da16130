//! Bot API implementations of the intake collaborators.

use crate::{FileMaterializer, MessageRelay};
use async_trait::async_trait;
use galleria_error::{IntakeError, IntakeErrorKind};
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tracing::{debug, instrument};

/// Forwards media into the relay channel with `forwardMessage`.
#[derive(Clone)]
pub struct BotRelay {
    bot: Bot,
}

impl BotRelay {
    /// Relay through `bot`.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageRelay for BotRelay {
    #[instrument(skip(self))]
    async fn forward(
        &self,
        relay_chat: i64,
        from_chat: i64,
        message_id: i32,
    ) -> Result<i32, IntakeError> {
        let forwarded = self
            .bot
            .forward_message(ChatId(relay_chat), ChatId(from_chat), MessageId(message_id))
            .await
            .map_err(|e| IntakeError::new(IntakeErrorKind::RelayFailed(e.to_string())))?;
        Ok(forwarded.id.0)
    }
}

/// Downloads files through a local Bot API server.
///
/// A local server answers `getFile` by saving the file into its working
/// directory and returning the absolute path; the part after the bot's own
/// directory is the path under the public download root.
#[derive(Clone)]
pub struct BotApiMaterializer {
    bot: Bot,
    credential: String,
}

impl BotApiMaterializer {
    /// `bot` must point at the local server (see `Bot::set_api_url`).
    pub fn new(bot: Bot, credential: impl Into<String>) -> Self {
        Self {
            bot,
            credential: credential.into(),
        }
    }
}

#[async_trait]
impl FileMaterializer for BotApiMaterializer {
    #[instrument(skip(self))]
    async fn materialize(&self, file_id: &str) -> Result<String, IntakeError> {
        let file = self
            .bot
            .get_file(file_id.to_string())
            .await
            .map_err(|e| IntakeError::new(IntakeErrorKind::DownloadFailed(e.to_string())))?;

        if file.path.is_empty() {
            return Err(IntakeError::new(IntakeErrorKind::DownloadFailed(
                "server returned no file path".to_string(),
            )));
        }

        let relative = relative_file_path(&file.path, &self.credential);
        debug!(relative_path = %relative, "File materialized");
        Ok(relative)
    }
}

/// Path of a downloaded file relative to the bot's directory.
///
/// Local servers report `/<workdir>/<token>/<kind>/<name>`; hosted servers
/// report `<kind>/<name>`.
///
/// ```
/// use galleria_bot::relative_file_path;
///
/// assert_eq!(
///     relative_file_path("/var/lib/telegram-bot-api/123:ABC/documents/file_4.zip", "123:ABC"),
///     "documents/file_4.zip"
/// );
/// assert_eq!(relative_file_path("videos/file_9.mp4", "123:ABC"), "videos/file_9.mp4");
/// ```
pub fn relative_file_path(path: &str, credential: &str) -> String {
    let marker = format!("/{}/", credential);
    match path.find(&marker) {
        Some(at) => path[at + marker.len()..].to_string(),
        None => path.trim_start_matches('/').to_string(),
    }
}
