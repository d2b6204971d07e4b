use alloc::borrow::Cow;
use core::fmt;

use crate::Node;
use crate::ops::{Map, NodeKind, NodeRef, Record, Sequence};

// -----------------------------------------------------------------------------
// Segment

/// A **single** step of a path.
///
/// A segment is opaque text; what it means — sequence index, map key, or
/// field name — is decided against each location it is looked up in, not at
/// parse time. The numeric interpretation is precomputed: a segment
/// consisting entirely of ASCII digits additionally carries its value as a
/// non-negative integer (`"0123"` carries `123`; the empty segment carries
/// nothing).
///
/// # Lookup rules
///
/// Against a location, [`lookup`](Segment::lookup) tries in order:
///
/// 1. the integer interpretation, when the segment has one and the location
///    is a map or a sequence. An out-of-range sequence index fails
///    definitively; an absent integer map key falls through to rule 2.
/// 2. the raw text as a map key.
/// 3. the raw text as a record field name — only when the location has no
///    keyed or indexed capability at all.
///
/// # Examples
///
/// ```
/// use delve::access::Segment;
///
/// let vec = vec![10_i32, 20, 30];
///
/// let segment = Segment::new("1");
/// let value = segment.lookup(&vec).unwrap();
/// assert_eq!(value.downcast_ref::<i32>(), Some(&20));
///
/// let segment = Segment::new("7");
/// assert!(segment.lookup(&vec).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment<'a> {
    text: Cow<'a, str>,
    /// Byte offset in the originating path string, for error messages.
    offset: Option<usize>,
    index: Option<u64>,
    digits: bool,
}

impl<'a> Segment<'a> {
    /// Creates a segment from its raw text.
    pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
        Self::build(text.into(), None)
    }

    /// Creates a segment carrying its byte offset in the originating path
    /// string. The offset is only used in error messages.
    pub fn with_offset(text: impl Into<Cow<'a, str>>, offset: usize) -> Self {
        Self::build(text.into(), Some(offset))
    }

    fn build(text: Cow<'a, str>, offset: Option<usize>) -> Self {
        let digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
        let index = if digits { text.parse().ok() } else { None };
        Self {
            text,
            offset,
            index,
            digits,
        }
    }

    /// Returns the raw text of the segment.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the byte offset of the segment in its path string, if it was
    /// parsed from one.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns the integer interpretation of the segment, if it has one.
    ///
    /// `None` either means the segment is not all digits, or that the digit
    /// run does not fit a `u64` (such a segment is still
    /// [`is_numeric`](Segment::is_numeric) and can never hit a position or an
    /// integer key).
    #[inline]
    pub fn index(&self) -> Option<u64> {
        self.index
    }

    /// Returns `true` if the segment is non-empty and all ASCII digits.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.digits
    }

    /// Converts this into an "owned" segment.
    pub fn into_owned(self) -> Segment<'static> {
        Segment {
            text: Cow::Owned(self.text.into_owned()),
            offset: self.offset,
            index: self.index,
            digits: self.digits,
        }
    }

    /// Re-borrows this segment without copying its text.
    pub(crate) fn reborrow(&self) -> Segment<'_> {
        Segment {
            text: Cow::Borrowed(self.text.as_ref()),
            offset: self.offset,
            index: self.index,
            digits: self.digits,
        }
    }

    /// Looks this segment up in `location`; on success returns the value one
    /// level down.
    ///
    /// This is the per-segment dispatch described on the type. All misses
    /// are reported as an [`AccessError`] carrying this segment and the
    /// low-level cause.
    pub fn lookup<'r>(&self, location: &'r dyn Node) -> Result<&'r dyn Node, AccessError<'a>> {
        let kind = match location.node_ref() {
            NodeRef::Map(map) => {
                if let Some(index) = self.index {
                    if let Some(value) = map.get_index(index) {
                        return Ok(value);
                    }
                    // The integer key is absent, but the segment may still be
                    // a numeric-string key.
                }
                match map.get(&self.text) {
                    Some(value) => return Ok(value),
                    None => AccessErrorKind::MissingKey,
                }
            }
            NodeRef::Sequence(seq) => {
                if self.digits {
                    let hit = self
                        .index
                        .and_then(|index| usize::try_from(index).ok())
                        .and_then(|index| seq.get(index));
                    match hit {
                        Some(value) => return Ok(value),
                        // Out of range is definitive: never retried as a
                        // string key.
                        None => AccessErrorKind::OutOfRange { len: seq.len() },
                    }
                } else {
                    // Sequences have no string keys.
                    AccessErrorKind::MissingKey
                }
            }
            NodeRef::Record(record) => match record.field(&self.text) {
                Some(value) => return Ok(value),
                None => AccessErrorKind::MissingField,
            },
            NodeRef::Null => AccessErrorKind::Unsupported(NodeKind::Null),
            NodeRef::Opaque(_) => AccessErrorKind::Unsupported(NodeKind::Opaque),
        };

        Err(AccessError {
            segment: self.clone(),
            kind,
        })
    }
}

impl fmt::Display for Segment<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// -----------------------------------------------------------------------------
// Error

/// The kind of [`AccessError`]: the low-level cause of a failed lookup.
///
/// Callers normally treat every kind the same way (the path missed); the
/// distinction exists for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessErrorKind {
    /// A numeric segment indexed a sequence beyond its length.
    OutOfRange {
        /// Length of the sequence that was indexed.
        len: usize,
    },
    /// A map contained neither a matching integer key nor a matching string
    /// key, or a sequence was accessed with a non-positional segment.
    MissingKey,
    /// A record has no field by the segment's name.
    MissingField,
    /// The location has no access capability at all.
    Unsupported(NodeKind),
}

/// An error originating from one [`Segment`] lookup within a path.
///
/// Use the `Display` impl of this type to get information on the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError<'a> {
    segment: Segment<'a>,
    kind: AccessErrorKind,
}

impl<'a> AccessError<'a> {
    /// Returns the kind of [`AccessError`].
    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Returns the [`Segment`] that failed to resolve.
    #[inline]
    pub fn segment(&self) -> &Segment<'a> {
        &self.segment
    }

    /// Returns the byte offset of the failed segment in its path string, if
    /// it was parsed from one.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        self.segment.offset()
    }

    /// Converts this into an "owned" error.
    pub fn into_owned(self) -> AccessError<'static> {
        AccessError {
            segment: self.segment.into_owned(),
            kind: self.kind,
        }
    }
}

impl fmt::Display for AccessError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error accessing segment `{}`", self.segment)?;
        if let Some(offset) = self.segment.offset() {
            write!(f, " (offset {offset})")?;
        }
        f.write_str(": ")?;

        match &self.kind {
            AccessErrorKind::OutOfRange { len } => {
                write!(
                    f,
                    "index `{}` is out of range for a sequence of length {len}",
                    self.segment
                )
            }
            AccessErrorKind::MissingKey => f.write_str("the container has no matching key"),
            AccessErrorKind::MissingField => f.write_str("the record has no field by that name"),
            AccessErrorKind::Unsupported(kind) => {
                write!(f, "a {kind} value cannot be traversed")
            }
        }
    }
}

impl core::error::Error for AccessError<'_> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn numeric_interpretation() {
        let segment = Segment::new("12");
        assert!(segment.is_numeric());
        assert_eq!(segment.index(), Some(12));

        // Leading zeros parse like the decimal they spell.
        let segment = Segment::new("0123");
        assert!(segment.is_numeric());
        assert_eq!(segment.index(), Some(123));

        let segment = Segment::new("1a");
        assert!(!segment.is_numeric());
        assert_eq!(segment.index(), None);

        // The empty segment never qualifies as numeric.
        let segment = Segment::new("");
        assert!(!segment.is_numeric());
        assert_eq!(segment.index(), None);

        // A digit run too large for u64 stays numeric but carries no index.
        let segment = Segment::new("99999999999999999999999999");
        assert!(segment.is_numeric());
        assert_eq!(segment.index(), None);
    }

    #[test]
    fn lookup_in_sequence() {
        let vec = vec![10_i32, 20];

        let hit = Segment::new("1").lookup(&vec).unwrap();
        assert_eq!(hit.downcast_ref::<i32>(), Some(&20));

        let miss = Segment::new("2").lookup(&vec).unwrap_err();
        assert_eq!(miss.kind(), &AccessErrorKind::OutOfRange { len: 2 });

        let miss = Segment::new("a").lookup(&vec).unwrap_err();
        assert_eq!(miss.kind(), &AccessErrorKind::MissingKey);
    }

    #[test]
    fn lookup_in_map_falls_back_to_numeric_string_key() {
        let mut map = BTreeMap::new();
        map.insert(String::from("0123"), 1_i32);

        // No integer key 123 exists, so the raw text is retried as a key.
        let hit = Segment::new("0123").lookup(&map).unwrap();
        assert_eq!(hit.downcast_ref::<i32>(), Some(&1));
    }

    #[test]
    fn lookup_in_integer_keyed_map() {
        let mut map = BTreeMap::new();
        map.insert(5_u64, "five");

        let hit = Segment::new("5").lookup(&map).unwrap();
        assert_eq!(hit.downcast_ref::<&'static str>(), Some(&"five"));

        let miss = Segment::new("6").lookup(&map).unwrap_err();
        assert_eq!(miss.kind(), &AccessErrorKind::MissingKey);
    }

    #[test]
    fn lookup_in_leaf_values() {
        let miss = Segment::new("a").lookup(&10_i32).unwrap_err();
        assert_eq!(
            miss.kind(),
            &AccessErrorKind::Unsupported(NodeKind::Opaque)
        );

        let miss = Segment::new("a").lookup(&None::<i32>).unwrap_err();
        assert_eq!(miss.kind(), &AccessErrorKind::Unsupported(NodeKind::Null));
    }

    #[test]
    fn error_display_carries_offset() {
        let vec = vec![1_i32];
        let err = Segment::with_offset("7", 4).lookup(&vec).unwrap_err();
        let rendered = alloc::format!("{err}");
        assert!(rendered.contains("`7`"));
        assert!(rendered.contains("offset 4"));
        assert!(rendered.contains("length 1"));
    }
}
