//! Property paths addressing fields inside a schema tree
//!
//! A [`Path`] is an immutable sequence of [`PathSegment`]s with two renderings:
//! - the dotted simple form, e.g. `user.tags[*]` or `rows[2].price`
//! - a JSON Pointer, e.g. `/user/tags/-` or `/rows/2/price`
//!
//! Patches emitted against JSON-Schema documents address fields through schema
//! pointers such as `/properties/user/properties/tags/items`; [`Path::from_schema_pointer`]
//! folds those into the same model.

mod parser;

use std::fmt::{self, Display};
use std::str::FromStr;

use error_stack::Report;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::json_schema::SchemaField;

/// JSON Pointer token for the array-items marker
const POINTER_ITEMS_TOKEN: &str = "-";

/// One step in a [`Path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathSegment {
    /// Named object property
    Property(String),
    /// Concrete array element
    Index(usize),
    /// Wildcard marker for "every element of the array"
    Items,
}

impl PathSegment {
    /// Render this segment as a single JSON Pointer token
    fn pointer_token(&self) -> String {
        match self {
            Self::Property(name) => name.replace('~', "~0").replace('/', "~1"),
            Self::Index(index) => index.to_string(),
            Self::Items => POINTER_ITEMS_TOKEN.to_string(),
        }
    }
}

/// An immutable property path
///
/// Every transform returns a new `Path`; the receiver is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, addressing the root
    pub const fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Build a path from already-validated segments
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Parse the dotted simple form
    ///
    /// `""` yields the empty path. A part that is not an identifier followed by
    /// `[n]`/`[*]` suffixes fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPathSegment`] naming the first malformed part.
    pub fn from_string(input: &str) -> Result<Self> {
        parser::parse_segments(input).map(|segments| Self { segments })
    }

    /// Parse a JSON-Schema pointer where fields appear as `/properties/<name>` pairs
    /// and array nesting as `/items`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPointer`] for any other pointer shape.
    pub fn from_schema_pointer(pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Ok(Self::empty());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(Report::new(Error::invalid_pointer(
                pointer,
                "must start with '/'",
            )));
        };

        let mut segments = Vec::new();
        let mut tokens = rest.split('/');
        while let Some(token) = tokens.next() {
            if token == SchemaField::Properties.as_ref() {
                let Some(name) = tokens.next() else {
                    return Err(Report::new(Error::invalid_pointer(
                        pointer,
                        "'properties' without a field name",
                    )));
                };
                segments.push(PathSegment::Property(
                    name.replace("~1", "/").replace("~0", "~"),
                ));
            } else if token == SchemaField::Items.as_ref() {
                segments.push(PathSegment::Items);
            } else {
                return Err(Report::new(Error::invalid_pointer(
                    pointer,
                    format!("unexpected token '{token}'"),
                )));
            }
        }

        Ok(Self { segments })
    }

    /// Whether this path addresses the root
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// The segments in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// First segment, if any
    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// Last segment, if any
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path without its last segment; the empty path is its own parent
    #[must_use]
    pub fn parent(&self) -> Self {
        let keep = self.segments.len().saturating_sub(1);
        Self {
            segments: self.segments[..keep].to_vec(),
        }
    }

    /// Append a property segment
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.with_segment(PathSegment::Property(name.into()))
    }

    /// Append an index segment
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        self.with_segment(PathSegment::Index(index))
    }

    /// Append the array-items marker
    #[must_use]
    pub fn child_items(&self) -> Self {
        self.with_segment(PathSegment::Items)
    }

    fn with_segment(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Segment-wise equality
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Whether `other` is a proper prefix of this path
    pub fn is_child_of(&self, other: &Self) -> bool {
        self.segments.len() > other.segments.len() && self.segments.starts_with(&other.segments)
    }

    /// Dotted form: `a.b[0][*].c`
    pub fn as_simple(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Property(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
                PathSegment::Items => out.push_str("[*]"),
            }
        }
        out
    }

    /// JSON Pointer form: `/a/b/0/-/c`
    pub fn as_json_pointer(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("/{}", segment.pointer_token()))
            .join("")
    }

    /// JSON-Schema pointer form: `/properties/a/items/properties/c`
    ///
    /// Index segments render as `/items` since a schema describes every element alike.
    pub fn as_schema_pointer(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Property(_) => {
                    format!("/{}/{}", SchemaField::Properties, segment.pointer_token())
                }
                PathSegment::Index(_) | PathSegment::Items => format!("/{}", SchemaField::Items),
            })
            .join("")
    }
}

impl FromStr for Path {
    type Err = Report<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_simple())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]
mod tests {
    use super::*;

    fn path(input: &str) -> Path {
        Path::from_string(input).expect("valid path")
    }

    #[test]
    fn simple_form_round_trips() {
        for input in ["", "a", "a.b", "tags[*]", "rows[3].price", "grid[0][*]", "a_b.c-d[*].e"] {
            assert_eq!(path(input).as_simple(), input);
        }
    }

    #[test]
    fn from_segments_round_trips_segments() {
        let parsed = path("user.tags[2][*]");
        let rebuilt = Path::from_segments(parsed.segments().to_vec());
        assert_eq!(rebuilt, parsed);
    }

    #[test]
    fn transforms_leave_receiver_untouched() {
        let base = path("user");
        let _ = base.child("name");
        let _ = base.child_index(1);
        let _ = base.child_items();
        let _ = base.parent();
        assert_eq!(base.as_simple(), "user");

        assert_eq!(base.child("name").as_simple(), "user.name");
        assert_eq!(base.child_index(1).as_simple(), "user[1]");
        assert_eq!(base.child_items().as_simple(), "user[*]");
    }

    #[test]
    fn empty_path_is_its_own_parent() {
        assert_eq!(Path::empty().parent(), Path::empty());
        assert_eq!(path("a.b").parent(), path("a"));
        assert!(path("").is_empty());
        assert_eq!(path("a.b[*]").len(), 3);
    }

    #[test]
    fn first_and_last() {
        let p = path("a.b[4]");
        assert_eq!(p.first(), Some(&PathSegment::Property("a".to_string())));
        assert_eq!(p.last(), Some(&PathSegment::Index(4)));
        assert_eq!(Path::empty().first(), None);
    }

    #[test]
    fn is_child_of_requires_proper_prefix() {
        let parent = path("user");
        assert!(path("user.name").is_child_of(&parent));
        assert!(path("user.address.city").is_child_of(&parent));
        assert!(!parent.is_child_of(&parent));
        assert!(!path("username").is_child_of(&parent));
        assert!(!path("other.name").is_child_of(&parent));
        assert!(parent.is_child_of(&Path::empty()));
    }

    #[test]
    fn json_pointer_rendering() {
        assert_eq!(path("a.b").as_json_pointer(), "/a/b");
        assert_eq!(path("rows[2].price").as_json_pointer(), "/rows/2/price");
        assert_eq!(path("tags[*]").as_json_pointer(), "/tags/-");
        assert_eq!(Path::empty().as_json_pointer(), "");
        assert_eq!(Path::empty().child("a/b").as_json_pointer(), "/a~1b");
    }

    #[test]
    fn schema_pointer_parsing() {
        let p = Path::from_schema_pointer("/properties/user/properties/name").unwrap();
        assert_eq!(p.as_simple(), "user.name");

        let p = Path::from_schema_pointer("/properties/tags/items/properties/label").unwrap();
        assert_eq!(p.as_simple(), "tags[*].label");
        assert_eq!(p.as_schema_pointer(), "/properties/tags/items/properties/label");

        assert!(Path::from_schema_pointer("").unwrap().is_empty());
    }

    #[test]
    fn malformed_schema_pointers_fail() {
        for pointer in ["properties/a", "/properties", "/fields/a", "/", "/properties/a/0"] {
            let error = Path::from_schema_pointer(pointer).unwrap_err();
            assert!(
                matches!(error.current_context(), Error::InvalidPointer(_)),
                "expected '{pointer}' to be rejected"
            );
        }
    }

    #[test]
    fn from_str_and_display_agree() {
        let p: Path = "a.b[*]".parse().unwrap();
        assert_eq!(p.to_string(), "a.b[*]");
        assert!("9lives".parse::<Path>().is_err());
    }
}
