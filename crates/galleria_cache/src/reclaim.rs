//! Oldest-first eviction when the cache volume runs low.

use crate::{FreeSpace, ReclaimConfig, VolumeSpace};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use walkdir::WalkDir;

/// Files removed during one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReclaimReport {
    /// Removed files, oldest first
    pub deleted: Vec<PathBuf>,
    /// Total size of removed files
    pub freed_bytes: u64,
}

/// What a single reclamation cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Cache directory does not exist yet
    MissingDirectory,
    /// Free space could not be measured; nothing was deleted
    MeasurementFailed,
    /// Free space is above the threshold
    Sufficient {
        /// Bytes available at measurement time
        available: u64,
    },
    /// Space was low and files were evicted
    Reclaimed(ReclaimReport),
}

struct CachedFile {
    path: PathBuf,
    modified: SystemTime,
    size: u64,
}

/// Background evictor for the download cache.
pub struct CacheReclaimer {
    config: ReclaimConfig,
    space: Arc<dyn FreeSpace>,
}

impl CacheReclaimer {
    /// Create a reclaimer measuring the real filesystem.
    pub fn new(config: ReclaimConfig) -> Self {
        Self::with_space(config, Arc::new(VolumeSpace))
    }

    /// Create a reclaimer with a custom free-space source.
    pub fn with_space(config: ReclaimConfig, space: Arc<dyn FreeSpace>) -> Self {
        Self { config, space }
    }

    /// Settings in effect.
    pub fn config(&self) -> &ReclaimConfig {
        &self.config
    }

    /// Run one measurement and, if needed, one eviction pass.
    ///
    /// Blocking: walks and deletes files synchronously.
    #[instrument(skip(self), fields(dir = %self.config.dir().display()))]
    pub fn run_cycle(&self) -> CycleOutcome {
        let dir = self.config.dir();
        if !dir.is_dir() {
            debug!("Cache directory missing, skipping cycle");
            return CycleOutcome::MissingDirectory;
        }

        let available = match self.space.available(dir) {
            Ok(bytes) => bytes,
            Err(e) => {
                // Unreliable measurement must never trigger deletion.
                warn!(error = %e, "Could not measure free space, assuming plenty");
                return CycleOutcome::MeasurementFailed;
            }
        };

        if available >= *self.config.min_free_bytes() {
            debug!(available, "Free space above threshold");
            return CycleOutcome::Sufficient { available };
        }

        info!(
            available,
            threshold = *self.config.min_free_bytes(),
            target = *self.config.reclaim_bytes(),
            "Free space low, evicting oldest cached files"
        );
        let report = self.evict_oldest();
        info!(
            deleted = report.deleted.len(),
            freed_bytes = report.freed_bytes,
            "Eviction finished"
        );
        CycleOutcome::Reclaimed(report)
    }

    fn collect_files(&self) -> Vec<CachedFile> {
        let mut files: Vec<CachedFile> = WalkDir::new(self.config.dir())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                let modified = metadata.modified().ok()?;
                Some(CachedFile {
                    path: entry.into_path(),
                    modified,
                    size: metadata.len(),
                })
            })
            .collect();
        files.sort_by_key(|f| f.modified);
        files
    }

    fn evict_oldest(&self) -> ReclaimReport {
        let target = *self.config.reclaim_bytes();
        let mut report = ReclaimReport::default();

        for file in self.collect_files() {
            if report.freed_bytes >= target {
                break;
            }
            match std::fs::remove_file(&file.path) {
                Ok(()) => {
                    debug!(path = %file.path.display(), size = file.size, "Evicted cached file");
                    report.freed_bytes += file.size;
                    report.deleted.push(file.path);
                }
                Err(e) => {
                    debug!(path = %file.path.display(), error = %e, "Skipping file that could not be removed");
                }
            }
        }
        report
    }

    /// Run cycles on the configured interval until `cancel` fires.
    ///
    /// Each cycle runs on the blocking pool so filesystem walks never stall
    /// the bot's event loop.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        if !*self.config.enabled() {
            info!("Cache reclamation disabled");
            return;
        }

        let period = Duration::from_secs((*self.config.interval_secs()).max(1));
        let mut interval = tokio::time::interval(period);
        info!(
            dir = %self.config.dir().display(),
            interval_secs = period.as_secs(),
            "Cache reclamation loop started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = cancel.cancelled() => {
                    info!("Cache reclamation loop shutting down");
                    return;
                }
            }

            let reclaimer = Arc::clone(&self);
            match tokio::task::spawn_blocking(move || reclaimer.run_cycle()).await {
                Ok(outcome) => debug!(?outcome, "Reclamation cycle complete"),
                Err(e) => error!(error = %e, "Reclamation cycle panicked"),
            }
        }
    }
}
