//! Reclamation settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const GIB: u64 = 1024 * 1024 * 1024;

/// Configuration for the cache reclamation loop (`[cache]` section).
#[derive(
    Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ReclaimConfig {
    /// Cache directory written by the download endpoint
    #[serde(default = "default_dir")]
    #[builder(default = "default_dir()")]
    dir: PathBuf,

    /// Seconds between cycles
    #[serde(default = "default_interval_secs")]
    #[builder(default = "default_interval_secs()")]
    interval_secs: u64,

    /// Reclaim when free space drops below this many bytes
    #[serde(default = "default_min_free_bytes")]
    #[builder(default = "default_min_free_bytes()")]
    min_free_bytes: u64,

    /// Stop deleting once this many bytes have been freed
    #[serde(default = "default_reclaim_bytes")]
    #[builder(default = "default_reclaim_bytes()")]
    reclaim_bytes: u64,

    /// Whether the loop runs at all
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from("/var/lib/telegram-bot-api")
}

fn default_interval_secs() -> u64 {
    600 // 10 minutes
}

fn default_min_free_bytes() -> u64 {
    2 * GIB
}

fn default_reclaim_bytes() -> u64 {
    5 * GIB
}

fn default_enabled() -> bool {
    true
}

impl Default for ReclaimConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            interval_secs: default_interval_secs(),
            min_free_bytes: default_min_free_bytes(),
            reclaim_bytes: default_reclaim_bytes(),
            enabled: default_enabled(),
        }
    }
}
