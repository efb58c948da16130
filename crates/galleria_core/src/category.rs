//! Operator-configured category labels.

use std::str::FromStr;

/// Labels used when no category list is configured.
pub const DEFAULT_CATEGORIES: &str =
    "Popular Cosplay,Video Cosplay,Explore Categories,Best Cosplayer,Level Cosplay,Top Cosplay";

/// Ordered list of category labels. The first label is the default for new albums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Build from explicit labels, dropping blanks and trimming whitespace.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list.
    ///
    /// ```
    /// use galleria_core::Categories;
    ///
    /// let cats = Categories::parse(" Portraits, ,Travel ");
    /// assert_eq!(cats.len(), 2);
    /// assert_eq!(cats.get(1), Some("Travel"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Label at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Label assigned to freshly started albums (empty if none are configured).
    pub fn default_label(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no labels are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::parse(DEFAULT_CATEGORIES)
    }
}

impl FromStr for Categories {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
