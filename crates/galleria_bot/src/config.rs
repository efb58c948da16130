//! Bot configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`defaults.toml` shipped with this crate)
//! 2. `./galleria.toml`, or the file given explicitly
//! 3. `GALLERIA_<SECTION>__<KEY>` environment variables

use crate::IntakeMode;
use config::{Config, Environment, File, FileFormat};
use galleria_cache::ReclaimConfig;
use galleria_core::Categories;
use galleria_error::{ConfigError, ConfigErrorKind, GalleriaError, GalleriaResult};
use galleria_storage::KvConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../defaults.toml");

/// Telegram access settings (`[telegram]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub token: String,
    /// User allowed to manage the allow-list
    pub owner_id: i64,
    /// Additional users allowed to build albums
    #[serde(default)]
    pub allowed_users: Vec<i64>,
}

/// Category labels, written either as `"A,B,C"` or `["A", "B", "C"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategorySetting {
    /// TOML array of labels
    List(Vec<String>),
    /// Comma-separated labels
    Joined(String),
}

impl Default for CategorySetting {
    fn default() -> Self {
        CategorySetting::Joined(String::new())
    }
}

/// Publishing settings (`[publish]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Root of the public gallery; albums are served at `<root>/<code>`
    pub worker_base_url: String,
    /// Prefix of generated codes
    pub code_prefix: String,
    /// Category labels, first is the default
    pub categories: CategorySetting,
    /// Title given to a freshly started album
    pub default_title: String,
}

impl PublishConfig {
    /// Parsed category list.
    pub fn category_list(&self) -> Categories {
        match &self.categories {
            CategorySetting::List(labels) => Categories::new(labels),
            CategorySetting::Joined(raw) => Categories::parse(raw),
        }
    }
}

/// Media intake settings (`[intake]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Relay channel id (`-100...`); 0 disables relaying
    #[serde(default)]
    pub relay_channel_id: i64,
    /// Link prefix of the relay channel, e.g. `https://t.me/c/3404008241`
    #[serde(default)]
    pub relay_link_prefix: String,
    /// Local Bot API server; enables direct download when set
    #[serde(default)]
    pub local_api_url: String,
    /// Public root serving the local server's files
    #[serde(default)]
    pub public_download_root: String,
}

impl IntakeConfig {
    /// Strategy selected by this configuration.
    ///
    /// Direct download wins when a local endpoint is configured, then relaying
    /// when both channel and link prefix are set, otherwise inline references.
    pub fn mode(&self) -> IntakeMode {
        if !self.local_api_url.trim().is_empty() {
            IntakeMode::Direct
        } else if self.relay_channel_id != 0 && !self.relay_link_prefix.trim().is_empty() {
            IntakeMode::Relay
        } else {
            IntakeMode::Inline
        }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleriaConfig {
    /// Telegram access
    pub telegram: TelegramConfig,
    /// Key-value store
    pub kv: KvConfig,
    /// Publishing
    pub publish: PublishConfig,
    /// Media intake
    pub intake: IntakeConfig,
    /// Download cache reclamation
    #[serde(default)]
    pub cache: ReclaimConfig,
}

fn config_error(context: &str, e: impl std::fmt::Display) -> GalleriaError {
    GalleriaError::from(ConfigError::new(ConfigErrorKind::Load(format!("{}: {}", context, e))))
}

impl GalleriaConfig {
    /// Load configuration, optionally from an explicit file.
    ///
    /// Without `path`, `./galleria.toml` is read if present.
    #[instrument]
    pub fn load(path: Option<&Path>) -> GalleriaResult<Self> {
        debug!("Loading configuration: env > file > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("galleria").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("GALLERIA")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("telegram.allowed_users")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| config_error("Failed to build configuration", e))?
            .try_deserialize()
            .map_err(|e| config_error("Failed to parse configuration", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    pub fn from_toml(toml: &str) -> GalleriaResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| config_error("Failed to build configuration", e))?
            .try_deserialize()
            .map_err(|e| config_error("Failed to parse configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the bot cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Missing("telegram.token".into())));
        }
        if self.telegram.owner_id == 0 {
            return Err(ConfigError::new(ConfigErrorKind::Missing("telegram.owner_id".into())));
        }
        if self.publish.category_list().is_empty() {
            return Err(ConfigError::invalid("publish.categories", "must name at least one category"));
        }
        if self.publish.code_prefix.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Missing("publish.code_prefix".into())));
        }
        if self.intake.mode() == IntakeMode::Direct {
            if self.intake.public_download_root.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "intake.public_download_root",
                    "required when intake.local_api_url is set",
                ));
            }
            reqwest::Url::parse(&self.intake.local_api_url).map_err(|e| {
                ConfigError::invalid("intake.local_api_url", format!("not a URL: {}", e))
            })?;
        }
        self.kv.validate()
    }
}
