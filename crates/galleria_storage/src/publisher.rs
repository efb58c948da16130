//! Publishing pipeline: allocate a code, persist the album, report the URL.

use crate::{CodeAllocator, KvStore};
use derive_getters::Getters;
use galleria_core::{Album, Code};
use galleria_error::GalleriaResult;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Public access URL for a published code: `<base_url>/<code>`.
///
/// ```
/// use galleria_core::Code;
/// use galleria_storage::public_url;
///
/// let code = Code::from_counter("a", 3);
/// assert_eq!(public_url("https://g.example.org/", &code), "https://g.example.org/a03");
/// ```
pub fn public_url(base_url: &str, code: &Code) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Published {
    code: Code,
    url: String,
}

/// Finalizes albums into immutable records in the key-value store.
pub struct Publisher {
    store: Arc<dyn KvStore>,
    allocator: CodeAllocator,
    base_url: String,
}

impl Publisher {
    /// Create a publisher over `store`, allocating codes with `prefix` and
    /// reporting URLs under `base_url`.
    pub fn new(
        store: Arc<dyn KvStore>,
        prefix: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let allocator = CodeAllocator::new(store.clone(), prefix);
        Self {
            store,
            allocator,
            base_url: base_url.into(),
        }
    }

    /// The allocator backing this publisher.
    pub fn allocator(&self) -> &CodeAllocator {
        &self.allocator
    }

    /// Store `album` under the next code.
    ///
    /// If the record write fails the error is returned and the counter is not
    /// rolled back, so the allocated code is never used.
    #[instrument(skip(self, album), fields(title = %album.title(), category = %album.category()))]
    pub async fn publish(&self, album: &Album) -> GalleriaResult<Published> {
        let record = album.to_json()?;
        let code = self.allocator.allocate_next_code().await?;

        if let Err(e) = self.store.put(code.as_str(), record.as_bytes()).await {
            error!(code = %code, error = %e, "Failed to write album record, code is burned");
            return Err(e);
        }

        let url = public_url(&self.base_url, &code);
        info!(code = %code, url = %url, "Published album");
        Ok(Published { code, url })
    }
}
