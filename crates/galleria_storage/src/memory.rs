//! In-process key-value store.

use crate::KvStore;
use galleria_error::{GalleriaResult, StorageError, StorageErrorKind};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Key-value store held in memory.
///
/// Used for dry runs (`kv.backend = "memory"`) and as the test double for the
/// publishing pipeline. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryKv {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryKv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, including the counter.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// All keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl KvStore for InMemoryKv {
    #[tracing::instrument(skip(self, value), fields(size = value.len()))]
    async fn put(&self, key: &str, value: &[u8]) -> GalleriaResult<()> {
        let text = String::from_utf8(value.to_vec()).map_err(|e| {
            StorageError::new(StorageErrorKind::WriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })?;
        self.entries.lock().insert(key.to_string(), text);
        Ok(())
    }

    async fn get(&self, key: &str) -> GalleriaResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> GalleriaResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
