//! Two-step deletion of published albums.

use galleria_core::{Code, UserId};
use galleria_error::{DeletionError, DeletionErrorKind, GalleriaResult};
use galleria_storage::{COUNTER_KEY, KvStore};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Codes awaiting a yes/no answer, one per user.
#[derive(Debug, Default)]
pub struct PendingDeletions {
    pending: Mutex<HashMap<UserId, Code>>,
}

impl PendingDeletions {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `code` for `user`, replacing any earlier request.
    pub fn insert(&self, user: UserId, code: Code) -> Option<Code> {
        self.pending.lock().insert(user, code)
    }

    /// The user's pending code, left in place.
    pub fn peek(&self, user: UserId) -> Option<Code> {
        self.pending.lock().get(&user).cloned()
    }

    /// Remove and return the user's pending code.
    pub fn take(&self, user: UserId) -> Option<Code> {
        self.pending.lock().remove(&user)
    }
}

/// Where a user stands in the deletion protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionState {
    /// Nothing pending
    Idle,
    /// Waiting for yes/no about this code
    AwaitingConfirmation(Code),
}

/// Result of a reply while awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// "yes": the record was deleted
    Deleted(Code),
    /// "no": the request was dropped
    Cancelled(Code),
    /// Anything else: still waiting
    Reprompt(Code),
}

/// Yes/no gate in front of record deletion.
///
/// While a user is awaiting confirmation their plain-text messages belong to
/// this protocol; callers route text here before treating it as a title.
pub struct DeletionProtocol {
    store: Arc<dyn KvStore>,
    pending: PendingDeletions,
}

impl DeletionProtocol {
    /// Create a protocol deleting from `store`.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            pending: PendingDeletions::new(),
        }
    }

    /// Current state for `user`.
    pub fn state(&self, user: UserId) -> DeletionState {
        match self.pending.peek(user) {
            Some(code) => DeletionState::AwaitingConfirmation(code),
            None => DeletionState::Idle,
        }
    }

    /// Whether `user` owes a yes/no answer.
    pub fn is_awaiting(&self, user: UserId) -> bool {
        self.pending.peek(user).is_some()
    }

    /// Ask to delete `code`. Fails with `NotFound` if no record exists under it.
    #[instrument(skip(self, code), fields(code = %code))]
    pub async fn request_delete(&self, user: UserId, code: Code) -> GalleriaResult<()> {
        if code.as_str() == COUNTER_KEY || !self.store.exists(code.as_str()).await? {
            return Err(DeletionError::new(DeletionErrorKind::NotFound(code.to_string())).into());
        }
        self.pending.insert(user, code);
        Ok(())
    }

    /// Handle a plain-text reply.
    ///
    /// Returns `None` when the user has nothing pending. "yes" and "no" are
    /// matched case-insensitively after trimming. If the store delete fails the
    /// request stays pending.
    #[instrument(skip(self, text))]
    pub async fn reply(&self, user: UserId, text: &str) -> GalleriaResult<Option<Confirmation>> {
        let Some(code) = self.pending.peek(user) else {
            return Ok(None);
        };

        let answer = text.trim().to_lowercase();
        let confirmation = match answer.as_str() {
            "yes" => {
                self.store.delete(code.as_str()).await?;
                self.pending.take(user);
                info!(code = %code, "Deleted album");
                Confirmation::Deleted(code)
            }
            "no" => {
                self.pending.take(user);
                Confirmation::Cancelled(code)
            }
            _ => Confirmation::Reprompt(code),
        };
        Ok(Some(confirmation))
    }
}
