//! Disk-space reclamation for the download cache.
//!
//! The direct-download intake strategy asks a local Bot API server to
//! materialize media into its working directory. Nothing else removes those
//! files, so a [`CacheReclaimer`] watches the free space on that volume and
//! evicts the oldest cached files when it runs low.
//!
//! The cache directory is a contract between the two: the bot's `cache.dir`
//! setting must name the directory the download endpoint writes into.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod reclaim;
mod space;

pub use config::{ReclaimConfig, ReclaimConfigBuilder};
pub use reclaim::{CacheReclaimer, CycleOutcome, ReclaimReport};
pub use space::{FreeSpace, VolumeSpace};
