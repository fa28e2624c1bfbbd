//! Source provenance keys.
//!
//! A [`Path`] names the physical origin of one source fragment. It is an
//! opaque provenance key, not a filesystem path: segments are never
//! interpreted, only compared.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered, immutable sequence of opaque segments identifying a fragment's origin.
///
/// ```rust
/// # use pathindex::element::Path;
/// let path = Path::new(["adapter", "Records", "Account"]);
/// assert_eq!(path.segments(), ["adapter", "Records", "Account"]);
/// assert_eq!(path, Path::from(vec!["adapter", "Records", "Account"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    /// Creates a path from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path(segments.into_iter().map(Into::into).collect())
    }

    /// The segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a path without segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> From<Vec<S>> for Path {
    fn from(segments: Vec<S>) -> Self {
        Path::new(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// One unmerged contribution to a logical id, paired with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<T> {
    /// The contributed value
    pub value: T,
    /// Provenance of the value
    pub path: Path,
}

impl<T> Fragment<T> {
    /// Creates a new fragment.
    pub fn new(value: T, path: Path) -> Self {
        Self { value, path }
    }

    /// Replaces the value, keeping the path.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fragment<U> {
        Fragment {
            value: f(self.value),
            path: self.path,
        }
    }
}
