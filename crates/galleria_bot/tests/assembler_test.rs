//! Album session tests against in-memory collaborators.

use async_trait::async_trait;
use galleria_bot::{
    AlbumAssembler, FileMaterializer, IntakeOutcome, IntakeStrategy, MediaDescriptor,
    MediaIntake, MediaKind, MessageRelay,
};
use galleria_core::{Album, Attachment, Categories};
use galleria_error::{
    GalleriaErrorKind, GalleriaResult, IntakeError, IntakeErrorKind, SessionErrorKind,
    StorageError, StorageErrorKind,
};
use galleria_storage::{InMemoryKv, KvStore, Publisher};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

const USER: i64 = 42;

fn assembler_with(store: Arc<dyn KvStore>, intake: MediaIntake) -> AlbumAssembler {
    AlbumAssembler::new(
        intake,
        Publisher::new(store, "a", "https://gallery.example.org"),
        Categories::default(),
        "Untitled",
    )
}

fn document(message_id: i32, name: &str) -> MediaDescriptor {
    MediaDescriptor::new(
        USER,
        message_id,
        format!("file-{}", message_id),
        Some(name.to_string()),
        Some("application/zip".to_string()),
        MediaKind::Document,
    )
}

/// Relay that fails on the messages listed in `fail_on` and numbers the rest.
struct FakeRelay {
    fail_on: Vec<i32>,
    next_id: AtomicI32,
}

#[async_trait]
impl MessageRelay for FakeRelay {
    async fn forward(
        &self,
        _relay_chat: i64,
        _from_chat: i64,
        message_id: i32,
    ) -> Result<i32, IntakeError> {
        if self.fail_on.contains(&message_id) {
            return Err(IntakeError::new(IntakeErrorKind::RelayFailed(
                "bot is not a member of the channel".to_string(),
            )));
        }
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

struct FakeMaterializer {
    fail: bool,
}

#[async_trait]
impl FileMaterializer for FakeMaterializer {
    async fn materialize(&self, file_id: &str) -> Result<String, IntakeError> {
        if self.fail {
            return Err(IntakeError::new(IntakeErrorKind::DownloadFailed(
                "file is too big".to_string(),
            )));
        }
        Ok(format!("documents/{}.zip", file_id))
    }
}

/// Store whose album writes can be switched off; the counter always succeeds.
struct SwitchableKv {
    inner: InMemoryKv,
    reject_records: AtomicBool,
}

#[async_trait]
impl KvStore for SwitchableKv {
    async fn put(&self, key: &str, value: &[u8]) -> GalleriaResult<()> {
        if key != "__counter" && self.reject_records.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::WriteFailed {
                key: key.to_string(),
                reason: "503".to_string(),
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

fn session_kind(err: &galleria_error::GalleriaError) -> Option<&SessionErrorKind> {
    match err.kind() {
        GalleriaErrorKind::Session(e) => Some(&e.kind),
        _ => None,
    }
}

#[tokio::test]
async fn summer_set_scenario_publishes_expected_record() {
    let store = Arc::new(InMemoryKv::new());
    let assembler = assembler_with(store.clone(), MediaIntake::inline());

    assert_eq!(assembler.begin(USER), "Popular Cosplay");
    assembler.set_title(USER, "Summer Set").unwrap();
    assert_eq!(assembler.set_category(USER, 2).unwrap(), "Explore Categories");
    assembler.add_cover_image(USER, "cover-ref").unwrap();
    let added = assembler
        .add_media(USER, &document(10, "bundle.zip"))
        .await
        .unwrap();
    assert!(*added.became_zip());

    let published = assembler.finish(USER).await.unwrap();
    assert_eq!(published.code().as_str(), "a01");
    assert_eq!(published.url(), "https://gallery.example.org/a01");
    assert!(!assembler.sessions().contains(USER));

    let raw = store.get("a01").await.unwrap().unwrap();
    let album = Album::from_json(&raw).unwrap();
    let attachment = Attachment::inline(
        "file-10",
        "bundle.zip",
        Some("application/zip".to_string()),
    );
    assert_eq!(album.title(), "Summer Set");
    assert_eq!(album.category(), "Explore Categories");
    assert_eq!(album.files(), &vec!["cover-ref".to_string()]);
    assert_eq!(album.attachments(), &vec![attachment.clone()]);
    assert_eq!(album.zip_ref(), &Some(attachment));
}

#[tokio::test]
async fn begin_twice_discards_first_album() {
    let store = Arc::new(InMemoryKv::new());
    let assembler = assembler_with(store.clone(), MediaIntake::inline());

    assembler.begin(USER);
    assembler.set_title(USER, "First").unwrap();
    assembler.add_cover_image(USER, "first-cover").unwrap();

    assembler.begin(USER);
    assembler.add_cover_image(USER, "second-cover").unwrap();
    assembler.finish(USER).await.unwrap();

    let album = Album::from_json(&store.get("a01").await.unwrap().unwrap()).unwrap();
    assert_eq!(album.title(), "Untitled");
    assert_eq!(album.files(), &vec!["second-cover".to_string()]);
}

#[tokio::test]
async fn operations_without_session_are_not_ready() {
    let store = Arc::new(InMemoryKv::new());
    let assembler = assembler_with(store.clone(), MediaIntake::inline());

    assert_eq!(
        assembler.set_title(USER, "x").unwrap_err().kind,
        SessionErrorKind::NotReady(USER)
    );
    assert_eq!(
        assembler.set_category(USER, 0).unwrap_err().kind,
        SessionErrorKind::NotReady(USER)
    );
    assert!(assembler.set_password(USER, "pw").is_err());
    assert!(assembler.add_cover_image(USER, "c").is_err());

    let err = assembler.add_media(USER, &document(1, "a.zip")).await.unwrap_err();
    assert_eq!(session_kind(&err), Some(&SessionErrorKind::NotReady(USER)));

    let err = assembler.finish(USER).await.unwrap_err();
    assert_eq!(session_kind(&err), Some(&SessionErrorKind::NotReady(USER)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn invalid_category_leaves_album_unchanged() {
    let assembler = assembler_with(Arc::new(InMemoryKv::new()), MediaIntake::inline());
    assembler.begin(USER);

    let err = assembler.set_category(USER, 6).unwrap_err();
    assert_eq!(
        err.kind,
        SessionErrorKind::InvalidCategory {
            index: 6,
            available: 6
        }
    );
    assert_eq!(
        assembler.current_category(USER).as_deref(),
        Some("Popular Cosplay")
    );
}

#[tokio::test]
async fn empty_album_is_not_published() {
    let store = Arc::new(InMemoryKv::new());
    let assembler = assembler_with(store.clone(), MediaIntake::inline());
    assembler.begin(USER);
    assembler.set_password(USER, "1234").unwrap();

    let err = assembler.finish(USER).await.unwrap_err();
    assert_eq!(session_kind(&err), Some(&SessionErrorKind::EmptyAlbum(USER)));
    assert!(assembler.sessions().contains(USER));
    assert!(store.get("__counter").await.unwrap().is_none());
}

#[tokio::test]
async fn second_archive_does_not_replace_zip() {
    let assembler = assembler_with(Arc::new(InMemoryKv::new()), MediaIntake::inline());
    assembler.begin(USER);

    let first = assembler.add_media(USER, &document(1, "notes.txt")).await.unwrap();
    assert!(!*first.became_zip());
    let second = assembler.add_media(USER, &document(2, "Part1.RAR")).await.unwrap();
    assert!(*second.became_zip());
    let third = assembler.add_media(USER, &document(3, "part2.7z")).await.unwrap();
    assert!(!*third.became_zip());

    let album = assembler.sessions().get(USER).unwrap();
    assert_eq!(album.attachments().len(), 3);
    assert_eq!(
        album.zip_ref().as_ref().map(|a| a.file_name()),
        Some("Part1.RAR")
    );
}

#[tokio::test]
async fn relay_failure_degrades_only_that_message() {
    let relay = Arc::new(FakeRelay {
        fail_on: vec![2],
        next_id: AtomicI32::new(100),
    });
    let intake = MediaIntake::new(IntakeStrategy::Relay {
        relay,
        channel_id: -1001234,
        link_prefix: "https://t.me/c/1234".to_string(),
    });
    let assembler = assembler_with(Arc::new(InMemoryKv::new()), intake);
    assembler.begin(USER);

    let first = assembler.add_media(USER, &document(1, "one.zip")).await.unwrap();
    assert!(matches!(first.outcome(), IntakeOutcome::Relayed(_)));

    let second = assembler.add_media(USER, &document(2, "two.mp4")).await.unwrap();
    match second.outcome() {
        IntakeOutcome::Degraded { attachment, reason } => {
            assert!(matches!(attachment, Attachment::Inline { .. }));
            assert!(matches!(reason.kind, IntakeErrorKind::RelayFailed(_)));
        }
        other => panic!("expected degraded outcome, got {:?}", other),
    }

    let third = assembler.add_media(USER, &document(3, "three.mp4")).await.unwrap();
    assert!(matches!(third.outcome(), IntakeOutcome::Relayed(_)));

    let album = assembler.sessions().get(USER).unwrap();
    assert_eq!(
        album.attachments(),
        &vec![
            Attachment::relay("one.zip", "https://t.me/c/1234/100"),
            Attachment::inline("file-2", "two.mp4", Some("application/zip".to_string())),
            Attachment::relay("three.mp4", "https://t.me/c/1234/101"),
        ]
    );
    assert_eq!(
        album.zip_ref(),
        &Some(Attachment::relay("one.zip", "https://t.me/c/1234/100"))
    );
}

#[tokio::test]
async fn direct_download_builds_public_url() {
    let intake = MediaIntake::new(IntakeStrategy::Direct {
        materializer: Arc::new(FakeMaterializer { fail: false }),
        public_root: "https://files.example.org/".to_string(),
        credential: "123:ABC".to_string(),
    });
    let assembler = assembler_with(Arc::new(InMemoryKv::new()), intake);
    assembler.begin(USER);

    let added = assembler.add_media(USER, &document(5, "big.zip")).await.unwrap();
    assert_eq!(
        added.outcome().attachment(),
        &Attachment::direct(
            "file-5",
            "big.zip",
            Some("application/zip".to_string()),
            "https://files.example.org/bot123:ABC/documents/file-5.zip",
        )
    );
}

#[tokio::test]
async fn direct_download_failure_leaves_album_unchanged() {
    let intake = MediaIntake::new(IntakeStrategy::Direct {
        materializer: Arc::new(FakeMaterializer { fail: true }),
        public_root: "https://files.example.org".to_string(),
        credential: "123:ABC".to_string(),
    });
    let assembler = assembler_with(Arc::new(InMemoryKv::new()), intake);
    assembler.begin(USER);

    let err = assembler.add_media(USER, &document(5, "big.zip")).await.unwrap_err();
    match err.kind() {
        GalleriaErrorKind::Intake(e) => {
            assert!(matches!(e.kind, IntakeErrorKind::DownloadFailed(_)))
        }
        other => panic!("expected intake error, got {:?}", other),
    }

    let album = assembler.sessions().get(USER).unwrap();
    assert!(album.attachments().is_empty());
    assert!(album.zip_ref().is_none());
}

#[tokio::test]
async fn failed_publish_keeps_session_and_burns_code() {
    let store = Arc::new(SwitchableKv {
        inner: InMemoryKv::new(),
        reject_records: AtomicBool::new(true),
    });
    let assembler = assembler_with(store.clone(), MediaIntake::inline());
    assembler.begin(USER);
    assembler.add_cover_image(USER, "cover").unwrap();

    let err = assembler.finish(USER).await.unwrap_err();
    assert!(matches!(err.kind(), GalleriaErrorKind::Storage(_)));
    assert!(assembler.sessions().contains(USER));

    store.reject_records.store(false, Ordering::SeqCst);
    let published = assembler.finish(USER).await.unwrap();
    assert_eq!(published.code().as_str(), "a02");
    assert!(store.get("a01").await.unwrap().is_none());
    assert!(!assembler.sessions().contains(USER));
}
