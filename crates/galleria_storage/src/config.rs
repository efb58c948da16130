//! Key-value backend selection.

use crate::{CloudflareKv, InMemoryKv, KvStore};
use galleria_error::{ConfigError, GalleriaResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Which key-value backend to publish into.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KvBackend {
    /// Cloudflare Workers KV over the REST API
    #[default]
    Cloudflare,
    /// Process memory; records vanish on exit
    Memory,
}

/// Key-value store settings (`[kv]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KvConfig {
    /// Backend to use
    #[serde(default)]
    pub backend: KvBackend,
    /// Cloudflare account id
    #[serde(default)]
    pub account_id: String,
    /// Workers KV namespace id
    #[serde(default)]
    pub namespace_id: String,
    /// API token with KV write permission
    #[serde(default)]
    pub api_token: String,
}

impl KvConfig {
    /// Check that the selected backend has what it needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == KvBackend::Cloudflare {
            for (name, value) in [
                ("kv.account_id", &self.account_id),
                ("kv.namespace_id", &self.namespace_id),
                ("kv.api_token", &self.api_token),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::invalid(
                        name,
                        "required for the cloudflare backend",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Construct the configured store.
pub fn build_store(config: &KvConfig) -> GalleriaResult<Arc<dyn KvStore>> {
    config.validate()?;
    match config.backend {
        KvBackend::Cloudflare => {
            info!(namespace = %config.namespace_id, "Using Cloudflare KV backend");
            Ok(Arc::new(CloudflareKv::new(
                config.account_id.clone(),
                config.namespace_id.clone(),
                config.api_token.clone(),
            )))
        }
        KvBackend::Memory => {
            warn!("Using in-memory KV backend, published albums will not persist");
            Ok(Arc::new(InMemoryKv::new()))
        }
    }
}
