//! Tests for oldest-first cache eviction.

use galleria_cache::{CacheReclaimer, CycleOutcome, FreeSpace, ReclaimConfig};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

struct FixedSpace(u64);

impl FreeSpace for FixedSpace {
    fn available(&self, _path: &Path) -> io::Result<u64> {
        Ok(self.0)
    }
}

struct BrokenSpace;

impl FreeSpace for BrokenSpace {
    fn available(&self, _path: &Path) -> io::Result<u64> {
        Err(io::Error::other("statvfs failed"))
    }
}

/// Write `size` bytes to `path` and backdate its mtime by `age_secs`.
fn cached_file(path: &Path, size: usize, age_secs: u64) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0u8; size]).unwrap();
    let modified = SystemTime::now() - Duration::from_secs(age_secs);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
    path.to_path_buf()
}

fn config(dir: &Path, min_free: u64, target: u64) -> ReclaimConfig {
    ReclaimConfig::default()
        .with_dir(dir.to_path_buf())
        .with_min_free_bytes(min_free)
        .with_reclaim_bytes(target)
}

#[test]
fn missing_directory_is_skipped() {
    let temp = TempDir::new().unwrap();
    let reclaimer = CacheReclaimer::with_space(
        config(&temp.path().join("absent"), 1_000, 1_000),
        Arc::new(FixedSpace(0)),
    );

    assert_eq!(reclaimer.run_cycle(), CycleOutcome::MissingDirectory);
}

#[test]
fn measurement_failure_deletes_nothing() {
    let temp = TempDir::new().unwrap();
    let file = cached_file(&temp.path().join("videos/a.mp4"), 64, 100);
    let reclaimer =
        CacheReclaimer::with_space(config(temp.path(), 1_000, 1_000), Arc::new(BrokenSpace));

    assert_eq!(reclaimer.run_cycle(), CycleOutcome::MeasurementFailed);
    assert!(file.exists());
}

#[test]
fn plenty_of_space_deletes_nothing() {
    let temp = TempDir::new().unwrap();
    let file = cached_file(&temp.path().join("documents/a.zip"), 64, 100);
    let reclaimer =
        CacheReclaimer::with_space(config(temp.path(), 1_000, 1_000), Arc::new(FixedSpace(5_000)));

    assert_eq!(
        reclaimer.run_cycle(),
        CycleOutcome::Sufficient { available: 5_000 }
    );
    assert!(file.exists());
}

#[test]
fn evicts_oldest_first_and_stops_at_target() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    // Created out of age order on purpose.
    let newest = cached_file(&root.join("videos/newest.mp4"), 100, 10);
    let oldest = cached_file(&root.join("documents/oldest.zip"), 100, 400);
    let newer = cached_file(&root.join("videos/newer.mp4"), 100, 100);
    let older = cached_file(&root.join("older.bin"), 100, 300);

    let reclaimer =
        CacheReclaimer::with_space(config(root, 1_000, 150), Arc::new(FixedSpace(10)));

    let CycleOutcome::Reclaimed(report) = reclaimer.run_cycle() else {
        panic!("expected eviction");
    };

    assert_eq!(report.deleted, vec![oldest.clone(), older.clone()]);
    assert_eq!(report.freed_bytes, 200);
    assert!(!oldest.exists());
    assert!(!older.exists());
    assert!(newer.exists());
    assert!(newest.exists());
}

#[test]
fn exhausts_file_list_when_target_unreachable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let a = cached_file(&root.join("a"), 10, 30);
    let b = cached_file(&root.join("nested/deeper/b"), 20, 20);
    let c = cached_file(&root.join("c"), 30, 10);

    let reclaimer =
        CacheReclaimer::with_space(config(root, 1_000, 10_000), Arc::new(FixedSpace(0)));

    let CycleOutcome::Reclaimed(report) = reclaimer.run_cycle() else {
        panic!("expected eviction");
    };

    assert_eq!(report.deleted, vec![a, b, c]);
    assert_eq!(report.freed_bytes, 60);
    assert!(root.join("nested/deeper").is_dir());
}

#[test]
fn exact_target_stops_without_extra_deletion() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let first = cached_file(&root.join("first"), 50, 30);
    let second = cached_file(&root.join("second"), 50, 20);
    let third = cached_file(&root.join("third"), 50, 10);

    let reclaimer = CacheReclaimer::with_space(config(root, 1_000, 100), Arc::new(FixedSpace(0)));

    let CycleOutcome::Reclaimed(report) = reclaimer.run_cycle() else {
        panic!("expected eviction");
    };

    assert_eq!(report.deleted, vec![first, second]);
    assert!(third.exists());
}

#[tokio::test(start_paused = true)]
async fn loop_stops_on_cancel() {
    let temp = TempDir::new().unwrap();
    let reclaimer = Arc::new(CacheReclaimer::with_space(
        config(temp.path(), 0, 0).with_interval_secs(1),
        Arc::new(FixedSpace(u64::MAX)),
    ));
    let cancel = tokio_util::sync::CancellationToken::new();

    let handle = tokio::spawn(reclaimer.run(cancel.clone()));
    tokio::time::sleep(Duration::from_secs(3)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop did not stop")
        .unwrap();
}

#[test]
fn builder_fills_defaults() {
    let config = galleria_cache::ReclaimConfigBuilder::default()
        .interval_secs(30)
        .build()
        .unwrap();
    assert_eq!(*config.interval_secs(), 30);
    assert_eq!(*config.min_free_bytes(), *ReclaimConfig::default().min_free_bytes());
    assert!(*config.enabled());
}
