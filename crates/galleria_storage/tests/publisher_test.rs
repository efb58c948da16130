//! Tests for the publishing pipeline.

use galleria_core::{Album, Attachment};
use galleria_error::{GalleriaErrorKind, GalleriaResult, StorageError, StorageErrorKind};
use galleria_storage::{COUNTER_KEY, InMemoryKv, KvStore, Publisher};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Store that can be told to reject album record writes.
#[derive(Default)]
struct FlakyKv {
    inner: InMemoryKv,
    reject_records: AtomicBool,
}

#[async_trait::async_trait]
impl KvStore for FlakyKv {
    async fn put(&self, key: &str, value: &[u8]) -> GalleriaResult<()> {
        if key != COUNTER_KEY && self.reject_records.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::WriteFailed {
                key: key.to_string(),
                reason: "HTTP 500".to_string(),
            })
            .into());
        }
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> GalleriaResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> GalleriaResult<()> {
        self.inner.delete(key).await
    }
}

fn album_with_zip() -> Album {
    let mut album = Album::new("Summer Set", "Explore Categories");
    album.add_cover_image("cover-1");
    album.add_attachment(Attachment::inline("doc-1", "bundle.zip", None));
    album
}

#[tokio::test]
async fn publish_stores_record_under_next_code() {
    let store = Arc::new(InMemoryKv::new());
    let publisher = Publisher::new(store.clone(), "a", "https://gallery.example.org/");
    let album = album_with_zip();

    let published = publisher.publish(&album).await.unwrap();

    assert_eq!(published.code().as_str(), "a01");
    assert_eq!(published.url(), "https://gallery.example.org/a01");

    let raw = store.get("a01").await.unwrap().unwrap();
    assert_eq!(Album::from_json(&raw).unwrap(), album);

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["zip"]["file_name"], "bundle.zip");
}

#[tokio::test]
async fn consecutive_publishes_use_consecutive_codes() {
    let store = Arc::new(InMemoryKv::new());
    let publisher = Publisher::new(store.clone(), "a", "https://g.example.org");

    for _ in 0..9 {
        publisher.publish(&album_with_zip()).await.unwrap();
    }
    let tenth = publisher.publish(&album_with_zip()).await.unwrap();

    assert_eq!(tenth.code().as_str(), "a10");
    assert!(store.exists("a09").await.unwrap());
    assert_eq!(store.len(), 11);
}

#[tokio::test]
async fn failed_record_write_burns_the_code() {
    let store = Arc::new(FlakyKv::default());
    let publisher = Publisher::new(store.clone(), "a", "https://g.example.org");

    store.reject_records.store(true, Ordering::SeqCst);
    let err = publisher.publish(&album_with_zip()).await.unwrap_err();
    assert!(matches!(err.kind(), GalleriaErrorKind::Storage(_)));
    assert!(!store.exists("a01").await.unwrap());
    assert_eq!(publisher.allocator().current().await.unwrap(), 1);

    store.reject_records.store(false, Ordering::SeqCst);
    let retry = publisher.publish(&album_with_zip()).await.unwrap();
    assert_eq!(retry.code().as_str(), "a02");
}
