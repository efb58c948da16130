use galleria_core::{Album, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory albums under construction, one per user.
///
/// Sessions are volatile and never expire; a new `begin` replaces whatever the
/// user had open. The lock is only held for the duration of each call.
#[derive(Debug, Default)]
pub struct SessionStore {
    albums: Mutex<HashMap<UserId, Album>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session with `album`, returning the one it replaced.
    pub fn begin(&self, user: UserId, album: Album) -> Option<Album> {
        self.albums.lock().insert(user, album)
    }

    /// Snapshot of the user's album.
    pub fn get(&self, user: UserId) -> Option<Album> {
        self.albums.lock().get(&user).cloned()
    }

    /// Whether `user` has an open session.
    pub fn contains(&self, user: UserId) -> bool {
        self.albums.lock().contains_key(&user)
    }

    /// Apply `f` to the user's album. Returns `None` when no session is open.
    pub fn mutate<R>(&self, user: UserId, f: impl FnOnce(&mut Album) -> R) -> Option<R> {
        self.albums.lock().get_mut(&user).map(f)
    }

    /// Close the session, returning its album.
    pub fn clear(&self, user: UserId) -> Option<Album> {
        self.albums.lock().remove(&user)
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.albums.lock().len()
    }

    /// Whether no sessions are open.
    pub fn is_empty(&self) -> bool {
        self.albums.lock().is_empty()
    }
}
