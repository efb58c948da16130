//! Short public identifiers for published albums.

use serde::{Deserialize, Serialize};

/// Public identifier of a published album, also its key in the key-value store.
///
/// Counter values below 10 are zero-padded to a single extra digit, so the
/// sequence for prefix `a` runs `a01`, `a02`, ..., `a09`, `a10`, `a11`, ...
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct Code(String);

impl Code {
    /// Render the code for counter value `n`.
    ///
    /// ```
    /// use galleria_core::Code;
    ///
    /// assert_eq!(Code::from_counter("a", 7).as_str(), "a07");
    /// assert_eq!(Code::from_counter("a", 10).as_str(), "a10");
    /// assert_eq!(Code::from_counter("a", 1234).as_str(), "a1234");
    /// ```
    pub fn from_counter(prefix: &str, n: u64) -> Self {
        if n < 10 {
            Self(format!("{prefix}0{n}"))
        } else {
            Self(format!("{prefix}{n}"))
        }
    }

    /// Wrap a code typed by an operator (e.g. the argument of a delete command).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
