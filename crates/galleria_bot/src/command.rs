//! Chat command parsing.

/// A slash command understood by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`: show help
    Start,
    /// `/start_album`: open a new album
    StartAlbum,
    /// `/nav`: pick a category
    Nav,
    /// `/set_pass <pw>`
    SetPass(Option<String>),
    /// `/delete <code>`
    Delete(Option<String>),
    /// `/end_album`: publish
    EndAlbum,
    /// `/allow <id>` (owner only)
    Allow(Option<String>),
    /// `/list_users` (owner only)
    ListUsers,
}

impl Command {
    /// Parse a message text. Returns `None` for plain text and unknown commands.
    ///
    /// A `@botname` suffix on the command is ignored and only the first
    /// whitespace-separated argument is kept.
    ///
    /// ```
    /// use galleria_bot::Command;
    ///
    /// assert_eq!(Command::parse("/delete a07"), Some(Command::Delete(Some("a07".into()))));
    /// assert_eq!(Command::parse("/end_album@gallery_bot"), Some(Command::EndAlbum));
    /// assert_eq!(Command::parse("Summer Set"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;
        let name = head.split('@').next().unwrap_or(head);
        let arg = words.next().map(str::to_string);

        let command = match name {
            "start" => Command::Start,
            "start_album" => Command::StartAlbum,
            "nav" => Command::Nav,
            "set_pass" => Command::SetPass(arg),
            "delete" => Command::Delete(arg),
            "end_album" => Command::EndAlbum,
            "allow" => Command::Allow(arg),
            "list_users" => Command::ListUsers,
            _ => return None,
        };
        Some(command)
    }

    /// Help text shown by `/start`.
    pub fn help() -> &'static str {
        "📸 Gallery bot ready\n\
         /start_album - start a new album\n\
         send text - set the title\n\
         /nav - choose a category\n\
         /set_pass <password> - set a password\n\
         /end_album - publish\n\
         /delete <code> - delete a published album\n\
         /allow <id> - allow a user (owner)\n\
         /list_users - list allowed users (owner)"
    }
}
