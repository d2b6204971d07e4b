use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt;

use crate::Node;
use crate::access::Segment;
use crate::ops::{NodeKind, NodeRef, Sequence};

// -----------------------------------------------------------------------------
// Error

/// An error from turning a path specification into segments.
///
/// The typed [`PathSpec`] implementations (`&str`, slices of strings) cannot
/// fail by construction; parse errors arise only from dynamically supplied
/// specifications (`&dyn Node`), where the shape of the specification is a
/// runtime property.
///
/// Unlike access misses, a parse error is never converted into the caller's
/// default: a malformed specification is a caller bug, not a missing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The specification value is neither a string nor a sequence of
    /// segments.
    InvalidSpecKind(NodeKind),
    /// A pre-split segment element is neither a string nor an integer.
    InvalidSegment {
        /// Position of the offending element in the specification sequence.
        position: usize,
        /// Kind of the offending element.
        kind: NodeKind,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpecKind(kind) => write!(
                f,
                "invalid path specification: expected a string or a sequence of segments, found a {kind} value",
            ),
            Self::InvalidSegment { position, kind } => write!(
                f,
                "invalid path segment at position {position}: expected a string or an integer, found a {kind} value",
            ),
        }
    }
}

impl core::error::Error for ParseError {}

// -----------------------------------------------------------------------------
// Path specifications

/// An interface where the type implementing this trait can be considered a
/// path specification.
///
/// A specification is either a delimited string or an already ordered
/// sequence of segments. This crate provides implementations for:
///
/// - `&str` / `&String`: split on `.`. No escaping, no trimming; empty
///   substrings produced by leading, trailing, or doubled delimiters are
///   preserved as empty segments and fail resolution naturally.
/// - `&[S]`, `&[S; N]`, `&Vec<S>` for `S: AsRef<str>`: pass-through, one
///   opaque segment per element. The empty slice is the empty path.
/// - [`&Path`](crate::access::Path): re-borrows pre-parsed segments.
/// - `&dyn Node`: a specification loaded as data. String nodes split like
///   `&str`; sequence nodes pass elements through, rendering integer
///   elements as index tokens; anything else fails with
///   [`ParseError::InvalidSpecKind`].
///
/// Implement this trait to plug a custom path syntax into
/// [`resolve`](crate::access::resolve).
pub trait PathSpec<'a> {
    /// Turns the specification into an ordered iterator of segments.
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>>;
}

impl<'a> PathSpec<'a> for &'a str {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        StrSegments::new(*self)
    }
}

impl<'a> PathSpec<'a> for &'a String {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        StrSegments::new(self.as_str())
    }
}

impl<'a, S: AsRef<str>> PathSpec<'a> for &'a [S] {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        self.iter().map(|segment| Ok(Segment::new(segment.as_ref())))
    }
}

impl<'a, S: AsRef<str>, const N: usize> PathSpec<'a> for &'a [S; N] {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        self.as_slice()
            .iter()
            .map(|segment| Ok(Segment::new(segment.as_ref())))
    }
}

impl<'a, S: AsRef<str>> PathSpec<'a> for &'a alloc::vec::Vec<S> {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        self.as_slice()
            .iter()
            .map(|segment| Ok(Segment::new(segment.as_ref())))
    }
}

// -----------------------------------------------------------------------------
// String splitting

/// Iterator over the `.`-separated segments of a path string, tracking byte
/// offsets for error reporting.
struct StrSegments<'a> {
    path: &'a str,
    position: usize,
    done: bool,
}

impl<'a> StrSegments<'a> {
    fn new(path: &'a str) -> Self {
        Self {
            path,
            position: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for StrSegments<'a> {
    type Item = Result<Segment<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.position;
        let rest = &self.path[offset..];
        match rest.find('.') {
            Some(dot) => {
                self.position = offset + dot + 1;
                Some(Ok(Segment::with_offset(&rest[..dot], offset)))
            }
            None => {
                self.done = true;
                Some(Ok(Segment::with_offset(rest, offset)))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Dynamic specifications

impl<'a> PathSpec<'a> for &'a dyn Node {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        let node: &'a dyn Node = *self;
        match node.node_ref() {
            NodeRef::Opaque(value) => match opaque_text(value) {
                Some(text) => DynSegments::Str(StrSegments::new(text)),
                None => DynSegments::Fail(Some(ParseError::InvalidSpecKind(NodeKind::Opaque))),
            },
            NodeRef::Sequence(seq) => DynSegments::Seq { seq, position: 0 },
            other => DynSegments::Fail(Some(ParseError::InvalidSpecKind(other.kind()))),
        }
    }
}

enum DynSegments<'a> {
    Str(StrSegments<'a>),
    Seq {
        seq: &'a dyn Sequence,
        position: usize,
    },
    Fail(Option<ParseError>),
}

impl<'a> Iterator for DynSegments<'a> {
    type Item = Result<Segment<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Str(segments) => segments.next(),
            Self::Seq { seq, position } => {
                let seq: &'a dyn Sequence = *seq;
                let element = seq.get(*position)?;
                let segment = dyn_segment(element, *position);
                *position += 1;
                Some(segment)
            }
            Self::Fail(error) => error.take().map(Err),
        }
    }
}

/// Extracts string text from an opaque node, if it holds one of the string
/// types this crate knows about.
fn opaque_text(value: &dyn Node) -> Option<&str> {
    if let Some(text) = value.downcast_ref::<String>() {
        return Some(text.as_str());
    }
    if let Some(text) = value.downcast_ref::<&'static str>() {
        return Some(*text);
    }
    if let Some(text) = value.downcast_ref::<Cow<'static, str>>() {
        return Some(text.as_ref());
    }
    #[cfg(feature = "json")]
    if let Some(serde_json::Value::String(text)) = value.downcast_ref::<serde_json::Value>() {
        return Some(text.as_str());
    }
    None
}

/// Turns one element of a pre-split specification sequence into a segment.
///
/// Integer elements are pre-decided index tokens; they are rendered as their
/// decimal text so that one lookup dispatch serves both specification forms.
fn dyn_segment(element: &dyn Node, position: usize) -> Result<Segment<'_>, ParseError> {
    if let Some(text) = opaque_text(element) {
        return Ok(Segment::new(text));
    }
    if let Some(token) = integer_token(element) {
        return Ok(Segment::new(token));
    }
    Err(ParseError::InvalidSegment {
        position,
        kind: element.kind(),
    })
}

fn integer_token(element: &dyn Node) -> Option<String> {
    macro_rules! try_integer {
        ($($ty:ty),+ $(,)?) => {$(
            if let Some(value) = element.downcast_ref::<$ty>() {
                return Some(value.to_string());
            }
        )+};
    }

    try_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

    #[cfg(feature = "json")]
    if let Some(serde_json::Value::Number(number)) = element.downcast_ref::<serde_json::Value>() {
        if number.is_u64() || number.is_i64() {
            return Some(number.to_string());
        }
    }

    None
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    fn collect<'a>(spec: impl PathSpec<'a>) -> Vec<Result<Segment<'a>, ParseError>> {
        spec.segments().collect()
    }

    fn texts<'a>(spec: impl PathSpec<'a>) -> Vec<(String, Option<usize>)> {
        collect(spec)
            .into_iter()
            .map(|segment| {
                let segment = segment.unwrap();
                (segment.text().to_string(), segment.offset())
            })
            .collect()
    }

    #[test]
    fn split_tracks_offsets() {
        assert_eq!(
            texts("a.bc.d"),
            vec![
                ("a".to_string(), Some(0)),
                ("bc".to_string(), Some(2)),
                ("d".to_string(), Some(5)),
            ]
        );
    }

    #[test]
    fn split_preserves_empty_segments() {
        assert_eq!(
            texts(".a."),
            vec![
                ("".to_string(), Some(0)),
                ("a".to_string(), Some(1)),
                ("".to_string(), Some(3)),
            ]
        );
        // The empty string is one empty segment, not an empty path.
        assert_eq!(texts(""), vec![("".to_string(), Some(0))]);
    }

    #[test]
    fn slices_pass_through() {
        let spec = ["a", "0", "b"];
        assert_eq!(
            texts(&spec),
            vec![
                ("a".to_string(), None),
                ("0".to_string(), None),
                ("b".to_string(), None),
            ]
        );

        let empty: [&str; 0] = [];
        assert!(texts(&empty).is_empty());

        let owned = vec!["x".to_string()];
        assert_eq!(texts(&owned), vec![("x".to_string(), None)]);
    }

    #[test]
    fn dynamic_string_spec_splits() {
        let spec = "a.b".to_string();
        let node: &dyn Node = &spec;
        assert_eq!(
            texts(node),
            vec![("a".to_string(), Some(0)), ("b".to_string(), Some(2))]
        );
    }

    #[test]
    fn dynamic_sequence_spec_renders_integers() {
        let mut spec = crate::ops::DynamicSeq::new();
        spec.push("li".to_string());
        spec.push(0_u64);
        let node: &dyn Node = &spec;
        assert_eq!(
            texts(node),
            vec![("li".to_string(), None), ("0".to_string(), None)]
        );
    }

    #[test]
    fn dynamic_spec_of_wrong_kind_fails() {
        let spec: BTreeMap<String, i32> = BTreeMap::new();
        let node: &dyn Node = &spec;
        assert_eq!(
            collect(node),
            vec![Err(ParseError::InvalidSpecKind(NodeKind::Map))]
        );

        let spec = 42_i32;
        let node: &dyn Node = &spec;
        assert_eq!(
            collect(node),
            vec![Err(ParseError::InvalidSpecKind(NodeKind::Opaque))]
        );
    }

    #[test]
    fn dynamic_sequence_spec_rejects_non_segment_elements() {
        let mut spec = crate::ops::DynamicSeq::new();
        spec.push("a");
        spec.push(true);
        let node: &dyn Node = &spec;

        let segments = collect(node);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].is_ok());
        assert_eq!(
            segments[1],
            Err(ParseError::InvalidSegment {
                position: 1,
                kind: NodeKind::Opaque,
            })
        );
    }
}
