//! Sequential code allocation against the persisted counter.

use crate::KvStore;
use galleria_core::Code;
use galleria_error::{GalleriaResult, StorageError, StorageErrorKind};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Reserved key holding the decimal counter. Never a valid album code.
pub const COUNTER_KEY: &str = "__counter";

/// Turns the persisted counter into the next album code.
///
/// Allocation is a read-modify-write on [`COUNTER_KEY`]. The key-value API
/// offers no atomic increment, so allocations within this process are
/// serialized through an async mutex; two processes sharing one namespace can
/// still race and hand out the same code.
pub struct CodeAllocator {
    store: Arc<dyn KvStore>,
    prefix: String,
    writer: Mutex<()>,
}

impl CodeAllocator {
    /// Create an allocator rendering codes with `prefix`.
    pub fn new(store: Arc<dyn KvStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            writer: Mutex::new(()),
        }
    }

    /// Prefix prepended to every code.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Current counter value; an absent or blank entry counts as zero.
    #[instrument(skip(self))]
    pub async fn current(&self) -> GalleriaResult<u64> {
        match self.store.get(COUNTER_KEY).await? {
            None => Ok(0),
            Some(raw) if raw.trim().is_empty() => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| StorageError::new(StorageErrorKind::CounterCorrupt(raw)).into()),
        }
    }

    /// Increment the counter and return the code for the new value.
    ///
    /// The increment is persisted before the code is returned. A caller that
    /// later fails to use the code does not give it back.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn allocate_next_code(&self) -> GalleriaResult<Code> {
        let _writer = self.writer.lock().await;

        let current = self.current().await?;
        let next = current + 1;
        debug!(current, next, "Advancing counter");

        self.store
            .put(COUNTER_KEY, next.to_string().as_bytes())
            .await?;

        let code = Code::from_counter(&self.prefix, next);
        info!(code = %code, "Allocated code");
        Ok(code)
    }
}
