//! Field path parsing for nested document access
//!
//! A field path is an ordered sequence of key names, written as a single
//! string joined by a separator (a period by default): `parent.child.leaf`.
//! There is no index or wildcard syntax; lists met along the way are
//! traversed implicitly by the resolver.

use crate::core::resolve;
use crate::core::value::Value;
use crate::error::{Result, StructPathError};
use std::fmt;

/// The default segment separator
pub const DEFAULT_SEPARATOR: &str = ".";

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a path using the default `.` separator
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_separator(input, DEFAULT_SEPARATOR)
    }

    /// Parse a path split on `separator`
    ///
    /// Interior empty segments are kept and name the empty key, trailing
    /// empty segments are dropped. A blank input or an empty separator is
    /// rejected. An input made only of separators has no segments and
    /// matches nothing.
    pub fn parse_with_separator(input: &str, separator: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(StructPathError::precondition(
                "Path cannot be null or empty",
            ));
        }
        if separator.is_empty() {
            return Err(StructPathError::precondition(
                "Path separator cannot be empty",
            ));
        }

        let mut segments: Vec<String> = input.split(separator).map(str::to_string).collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        Ok(Self { segments })
    }

    /// Build a path from already split segments
    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the segments of this path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Create a new path by appending a segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Resolve this path against a document
    ///
    /// A path without segments names no field and matches nothing.
    pub fn resolve<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        if self.segments.is_empty() {
            return Vec::new();
        }
        resolve::resolve(root, &self.segments)
    }

    /// Render the path with the given separator
    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(DEFAULT_SEPARATOR))
    }
}

impl std::str::FromStr for FieldPath {
    type Err = StructPathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<[String]> for FieldPath {
    fn as_ref(&self) -> &[String] {
        &self.segments
    }
}
