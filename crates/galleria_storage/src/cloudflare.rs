//! Cloudflare Workers KV backend over the REST API.

use crate::KvStore;
use galleria_error::{ConfigError, GalleriaResult, StorageError, StorageErrorKind};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, instrument};

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Workers KV namespace accessed with an API token.
#[derive(Debug, Clone)]
pub struct CloudflareKv {
    client: Client,
    api_base: String,
    account_id: String,
    namespace_id: String,
    api_token: String,
}

impl CloudflareKv {
    /// Create a client for one KV namespace.
    #[instrument(skip_all, fields(token_len = api_token.len()))]
    pub fn new(
        account_id: impl Into<String>,
        namespace_id: impl Into<String>,
        api_token: String,
    ) -> Self {
        debug!("Creating Cloudflare KV client");
        Self {
            client: Client::new(),
            api_base: CLOUDFLARE_API_BASE.to_string(),
            account_id: account_id.into(),
            namespace_id: namespace_id.into(),
            api_token,
        }
    }

    /// Point the client at a different API root (e.g. a staging proxy).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// URL of the value endpoint for `key`, with the key escaped as one path segment.
    pub fn value_url(&self, key: &str) -> GalleriaResult<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::invalid("kv.api_base", format!("{}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::invalid("kv.api_base", format!("{} cannot hold a path", self.api_base)))?
            .pop_if_empty()
            .extend([
                "accounts",
                self.account_id.as_str(),
                "storage",
                "kv",
                "namespaces",
                self.namespace_id.as_str(),
                "values",
                key,
            ]);
        Ok(url)
    }
}

/// The request never got an HTTP answer.
fn unreachable_store(operation: &str, e: reqwest::Error) -> StorageError {
    error!(operation, error = ?e, "KV request failed");
    StorageError::new(StorageErrorKind::Unavailable(e.to_string()))
}

#[async_trait::async_trait]
impl KvStore for CloudflareKv {
    #[instrument(skip(self, value), fields(size = value.len()))]
    async fn put(&self, key: &str, value: &[u8]) -> GalleriaResult<()> {
        let url = self.value_url(key)?;
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(value.to_vec())
            .send()
            .await
            .map_err(|e| unreachable_store("put", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "KV put rejected");
            return Err(StorageError::new(StorageErrorKind::WriteFailed {
                key: key.to_string(),
                reason: format!("HTTP {}: {}", status, body),
            })
            .into());
        }

        debug!("KV put succeeded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> GalleriaResult<Option<String>> {
        let url = self.value_url(key)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| unreachable_store("get", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("KV key absent");
                Ok(None)
            }
            status if status.is_success() => {
                let text = response.text().await.map_err(|e| {
                    StorageError::new(StorageErrorKind::ReadFailed {
                        key: key.to_string(),
                        reason: e.to_string(),
                    })
                })?;
                Ok(Some(text))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %body, "KV get rejected");
                Err(StorageError::new(StorageErrorKind::ReadFailed {
                    key: key.to_string(),
                    reason: format!("HTTP {}: {}", status, body),
                })
                .into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> GalleriaResult<()> {
        let url = self.value_url(key)?;
        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| unreachable_store("delete", e))?;

        let status = response.status();
        if status.is_success() {
            debug!("KV delete succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "KV delete rejected");
        Err(StorageError::new(StorageErrorKind::DeleteFailed {
            key: key.to_string(),
            reason: format!("HTTP {}: {}", status, body),
        })
        .into())
    }
}
