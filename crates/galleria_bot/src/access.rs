//! Who may operate the bot.
//!
//! The owner is fixed by configuration and can add operators at runtime with
//! `/allow`. Everyone else is turned away before any album state is touched.
//!
//! ```
//! use galleria_bot::AccessControl;
//!
//! let access = AccessControl::new(1001, [2002]);
//! assert!(access.check(2002));
//! assert!(access.authorize(3003).is_err());
//! assert!(access.allow(3003));
//! assert_eq!(access.list(), vec![2002, 3003]);
//! ```

use galleria_core::UserId;
use galleria_error::{SessionError, SessionErrorKind};
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Owner plus a runtime allow-list of operators.
///
/// Only the owner may change the list; additions last until the process exits.
#[derive(Debug)]
pub struct AccessControl {
    owner_id: UserId,
    allowed: RwLock<BTreeSet<UserId>>,
}

impl AccessControl {
    /// Create an access list with `owner_id` and the initial operators.
    pub fn new(owner_id: UserId, allowed_users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            owner_id,
            allowed: RwLock::new(allowed_users.into_iter().collect()),
        }
    }

    /// Check if a user may operate the bot.
    pub fn check(&self, user_id: UserId) -> bool {
        user_id == self.owner_id || self.allowed.read().contains(&user_id)
    }

    /// Like [`check`](Self::check), as a typed error.
    pub fn authorize(&self, user_id: UserId) -> Result<(), SessionError> {
        if self.check(user_id) {
            Ok(())
        } else {
            Err(SessionError::new(SessionErrorKind::Unauthorized(user_id)))
        }
    }

    /// Whether `user_id` is the owner.
    pub fn is_owner(&self, user_id: UserId) -> bool {
        user_id == self.owner_id
    }

    /// Add a user. Returns `false` if they were already listed.
    pub fn allow(&self, user_id: UserId) -> bool {
        self.allowed.write().insert(user_id)
    }

    /// Allow-listed users in ascending order, owner excluded.
    pub fn list(&self) -> Vec<UserId> {
        self.allowed.read().iter().copied().collect()
    }
}
