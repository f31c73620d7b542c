//! Path segments and JSON-pointer rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step from a record root to a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field name inside an object.
    Key(String),
    /// A position inside an array.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        PathSegment::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // RFC 6901 escaping: '~' first, then '/'.
            PathSegment::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1")),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Render segments as a slash-delimited pointer from the record root.
///
/// An empty path renders as the empty string, which addresses the root.
pub fn pointer<'a>(segments: impl IntoIterator<Item = &'a PathSegment>) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    out
}
