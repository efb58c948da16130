//! Key-value persistence and publishing for Galleria.
//!
//! Published albums live in a remote key-value store, one JSON record per
//! [`Code`](galleria_core::Code), plus a counter entry under [`COUNTER_KEY`].
//! The store is consumed through the [`KvStore`] trait so the publishing
//! pipeline can run against Cloudflare Workers KV in production and an
//! in-memory map in tests and dry runs.
//!
//! # Example
//!
//! ```rust
//! use galleria_core::{Album, Attachment};
//! use galleria_storage::{InMemoryKv, KvStore, Publisher};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store: Arc<dyn KvStore> = Arc::new(InMemoryKv::new());
//! let publisher = Publisher::new(store.clone(), "a", "https://gallery.example.org");
//!
//! let mut album = Album::new("Summer Set", "Travel");
//! album.add_attachment(Attachment::inline("BQAC", "bundle.zip", None));
//!
//! let published = publisher.publish(&album).await?;
//! assert_eq!(published.code().as_str(), "a01");
//! assert_eq!(published.url(), "https://gallery.example.org/a01");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allocator;
mod cloudflare;
mod config;
mod kv;
mod memory;
mod publisher;

pub use allocator::{COUNTER_KEY, CodeAllocator};
pub use cloudflare::CloudflareKv;
pub use config::{KvBackend, KvConfig, build_store};
pub use kv::KvStore;
pub use memory::InMemoryKv;
pub use publisher::{Published, Publisher, public_url};
