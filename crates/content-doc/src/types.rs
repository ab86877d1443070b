//! Path types for addressing values inside a [`Document`](crate::Document).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::Kind;

/// A step in a path.
///
/// A `Key` addresses a mapping entry, an `Index` addresses a sequence slot.
/// The serialized form is untagged: `"title"` is a key, `0` is an index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl PathStep {
    /// Create a key step.
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        PathStep::Key(k.into())
    }

    /// Create an index step.
    #[inline]
    pub fn index(i: usize) -> Self {
        PathStep::Index(i)
    }

    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }

    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(k) => Some(k),
            PathStep::Index(_) => None,
        }
    }

    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Key(_) => None,
            PathStep::Index(i) => Some(*i),
        }
    }

    /// The container kind this step addresses into: a sequence for an
    /// index, a mapping for a key.
    #[inline]
    pub fn container_kind(&self) -> Kind {
        match self {
            PathStep::Key(_) => Kind::Object,
            PathStep::Index(_) => Kind::Array,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => f.write_str(k),
            PathStep::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<String> for PathStep {
    fn from(s: String) -> Self {
        PathStep::Key(s)
    }
}

impl From<&str> for PathStep {
    fn from(s: &str) -> Self {
        PathStep::Key(s.to_owned())
    }
}

impl From<usize> for PathStep {
    fn from(i: usize) -> Self {
        PathStep::Index(i)
    }
}

/// A path: the steps from the root to a value.
pub type Path = Vec<PathStep>;

/// Build a [`Path`] from string and integer literals.
///
/// ```
/// use content_doc::{path, PathStep};
///
/// let p = path!["hero", "trust", 0, "value"];
/// assert_eq!(p[2], PathStep::Index(0));
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::PathStep>::new()
    };
    ($($step:expr),+ $(,)?) => {
        ::std::vec![$($crate::PathStep::from($step)),+]
    };
}
