//! Key-value gateway trait.

use galleria_error::GalleriaResult;

/// Byte-oriented access to the remote key-value store.
///
/// Implementations report transport and backend failures as
/// [`StorageError`](galleria_error::StorageError); an absent key is not an error.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Write `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> GalleriaResult<()>;

    /// Read the value under `key` as text, or `None` if the key is absent.
    async fn get(&self, key: &str) -> GalleriaResult<Option<String>>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> GalleriaResult<()>;

    /// Whether a value exists under `key`.
    async fn exists(&self, key: &str) -> GalleriaResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
