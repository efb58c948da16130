//! Teloxide endpoints and per-update logic.

use crate::{
    Command, GalleriaBot, MediaDescriptor, MediaKind, MediaStart, category_rows,
    operator_message, parse_category_callback,
};
use galleria_core::{Code, UserId};
use galleria_error::{GalleriaError, GalleriaResult, SessionErrorKind, TelegramError};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::{debug, error, warn};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Session key for a Telegram user, or `None` if the id does not fit.
fn user_key(id: teloxide::types::UserId) -> Option<UserId> {
    i64::try_from(id.0).ok()
}

/// Teloxide handler for incoming messages.
pub(crate) async fn handle_message(msg: Message, app: Arc<GalleriaBot>) -> HandlerResult {
    let Some(user) = msg.from.as_ref().and_then(|u| user_key(u.id)) else {
        return Ok(());
    };

    if let Err(e) = app.on_message(&msg, user).await {
        error!(chat_id = msg.chat.id.0, user, error = %e, "Message handler error");
    }
    Ok(())
}

/// Teloxide handler for inline keyboard presses.
pub(crate) async fn handle_callback(
    q: CallbackQuery,
    app: Arc<GalleriaBot>,
) -> HandlerResult {
    let _ = app.bot.answer_callback_query(q.id.clone()).await;

    let Some(user) = user_key(q.from.id) else {
        return Ok(());
    };
    let Some(index) = q.data.as_deref().and_then(parse_category_callback) else {
        return Ok(());
    };
    let Some((chat, message_id)) = q.message.as_ref().map(|m| (m.chat().id, m.id())) else {
        return Ok(());
    };

    if let Err(e) = app.on_category_selected(chat, message_id, user, index).await {
        warn!(chat_id = chat.0, user, error = %e, "Callback handler error");
    }
    Ok(())
}

impl GalleriaBot {
    async fn reply(&self, chat: ChatId, text: impl Into<String>) -> GalleriaResult<Message> {
        self.bot
            .send_message(chat, text.into())
            .await
            .map_err(|e| TelegramError::new(e.to_string()).into())
    }

    async fn edit(&self, chat: ChatId, message_id: MessageId, text: impl Into<String>) -> GalleriaResult<()> {
        self.bot
            .edit_message_text(chat, message_id, text.into())
            .await
            .map_err(|e| GalleriaError::from(TelegramError::new(e.to_string())))?;
        Ok(())
    }

    /// Reply "not authorized" and return `false` for users outside the allow-list.
    async fn authorize(&self, chat: ChatId, user: UserId) -> GalleriaResult<bool> {
        match self.access.authorize(user) {
            Ok(()) => Ok(true),
            Err(e) => {
                debug!(user, "Rejected unauthorized user");
                self.reply(chat, operator_message(&GalleriaError::from(e))).await?;
                Ok(false)
            }
        }
    }

    async fn on_message(&self, msg: &Message, user: UserId) -> GalleriaResult<()> {
        let chat = msg.chat.id;

        if let Some(text) = msg.text() {
            if let Some(command) = Command::parse(text) {
                return self.on_command(chat, user, command).await;
            }
            if !self.authorize(chat, user).await? {
                return Ok(());
            }
            return self.on_text(chat, user, text).await;
        }

        if let Some(sizes) = msg.photo() {
            if !self.authorize(chat, user).await? {
                return Ok(());
            }
            // Sizes arrive smallest first.
            if let Some(largest) = sizes.last() {
                let file_id = largest.file.id.to_string();
                if let Some(text) = self.router.route_photo(user, &file_id) {
                    self.reply(chat, text).await?;
                }
            }
            return Ok(());
        }

        let media = if let Some(video) = msg.video() {
            MediaDescriptor::new(
                chat.0,
                msg.id.0,
                video.file.id.to_string(),
                video.file_name.clone(),
                video.mime_type.as_ref().map(|m| m.to_string()),
                MediaKind::Video,
            )
        } else if let Some(document) = msg.document() {
            MediaDescriptor::new(
                chat.0,
                msg.id.0,
                document.file.id.to_string(),
                document.file_name.clone(),
                document.mime_type.as_ref().map(|m| m.to_string()),
                MediaKind::Document,
            )
        } else {
            return Ok(());
        };

        if !self.authorize(chat, user).await? {
            return Ok(());
        }
        self.on_media(chat, user, media).await
    }

    async fn on_command(&self, chat: ChatId, user: UserId, command: Command) -> GalleriaResult<()> {
        debug!(user, ?command, "Command received");

        match &command {
            Command::Allow(arg) => {
                if !self.access.is_owner(user) {
                    return Ok(());
                }
                match arg.as_deref().and_then(|raw| raw.parse::<UserId>().ok()) {
                    Some(id) => {
                        self.access.allow(id);
                        self.reply(chat, format!("✅ Added {}", id)).await?;
                    }
                    None => debug!("Ignoring /allow without a numeric id"),
                }
                return Ok(());
            }
            Command::ListUsers => {
                if self.access.is_owner(user) {
                    self.reply(chat, format!("Users: {:?}", self.access.list())).await?;
                }
                return Ok(());
            }
            _ => {}
        }

        if !self.authorize(chat, user).await? {
            return Ok(());
        }

        match command {
            Command::Start => {
                self.reply(chat, Command::help()).await?;
            }
            Command::StartAlbum => {
                let category = self.router.assembler().begin(user);
                self.reply(
                    chat,
                    format!("🟦 Album started. Default category: {}\nSend the title as a message.", category),
                )
                .await?;
            }
            Command::Nav => match self.router.assembler().current_category(user) {
                Some(current) => {
                    let keyboard = InlineKeyboardMarkup::new(
                        category_rows(self.router.assembler().categories())
                            .into_iter()
                            .map(|row| {
                                row.into_iter()
                                    .map(|(label, data)| InlineKeyboardButton::callback(label, data))
                                    .collect::<Vec<_>>()
                            })
                            .collect::<Vec<_>>(),
                    );
                    self.bot
                        .send_message(chat, format!("👇 Current: {}", current))
                        .reply_markup(keyboard)
                        .await
                        .map_err(|e| GalleriaError::from(TelegramError::new(e.to_string())))?;
                }
                None => {
                    self.reply(chat, "Send /start_album first.").await?;
                }
            },
            Command::SetPass(arg) => {
                if !self.router.assembler().sessions().contains(user) {
                    self.reply(chat, "No album in progress.").await?;
                    return Ok(());
                }
                match arg {
                    Some(password) => match self.router.assembler().set_password(user, &password) {
                        Ok(()) => {
                            self.reply(chat, format!("🔒 Password: {}", password)).await?;
                        }
                        Err(e) => {
                            self.reply(chat, operator_message(&GalleriaError::from(e))).await?;
                        }
                    },
                    None => {
                        self.reply(chat, "Usage: /set_pass 1234").await?;
                    }
                }
            }
            Command::Delete(arg) => match arg {
                Some(raw) => {
                    let code = Code::new(raw);
                    match self.router.deletions().request_delete(user, code.clone()).await {
                        Ok(()) => {
                            self.reply(chat, format!("⚠️ Delete {}? Reply yes or no.", code)).await?;
                        }
                        Err(e) => {
                            self.reply(chat, operator_message(&e)).await?;
                        }
                    }
                }
                None => {
                    self.reply(chat, "Usage: /delete a01").await?;
                }
            },
            Command::EndAlbum => {
                let reply = self.router.route_end_album(user).await;
                self.reply(chat, reply).await?;
            }
            Command::Allow(_) | Command::ListUsers => {}
        }
        Ok(())
    }

    async fn on_text(&self, chat: ChatId, user: UserId, text: &str) -> GalleriaResult<()> {
        let reply = self.router.route_text(user, text).await;
        self.reply(chat, reply).await.map(|_| ())
    }

    async fn on_media(&self, chat: ChatId, user: UserId, media: MediaDescriptor) -> GalleriaResult<()> {
        let status = match self.router.media_start(user, &media) {
            MediaStart::Rejected(text) => return self.reply(chat, text).await.map(|_| ()),
            MediaStart::Accepted { provisional: Some(text) } => Some(self.reply(chat, text).await?.id),
            MediaStart::Accepted { provisional: None } => None,
        };

        let reply = self.router.route_media(user, &media).await;
        for notice in reply.notices() {
            self.reply(chat, notice.as_str()).await?;
        }

        match status {
            Some(message_id) => self.edit(chat, message_id, reply.text().as_str()).await,
            None => self.reply(chat, reply.text().as_str()).await.map(|_| ()),
        }
    }

    async fn on_category_selected(
        &self,
        chat: ChatId,
        message_id: MessageId,
        user: UserId,
        index: usize,
    ) -> GalleriaResult<()> {
        if !self.access.check(user) {
            return Ok(());
        }
        let text = match self.router.assembler().set_category(user, index) {
            Ok(label) => format!("✅ Category: {}", label),
            Err(e) => match e.kind {
                SessionErrorKind::NotReady(_) => "Expired.".to_string(),
                _ => operator_message(&GalleriaError::from(e)),
            },
        };
        self.edit(chat, message_id, text).await
    }
}
