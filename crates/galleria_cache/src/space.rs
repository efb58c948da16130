//! Free-space measurement.

use std::io;
use std::path::Path;

/// Reports bytes available to unprivileged writers on the volume holding a path.
pub trait FreeSpace: Send + Sync {
    /// Available bytes on the volume containing `path`.
    fn available(&self, path: &Path) -> io::Result<u64>;
}

/// Measures the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeSpace;

impl FreeSpace for VolumeSpace {
    fn available(&self, path: &Path) -> io::Result<u64> {
        fs2::available_space(path)
    }
}
