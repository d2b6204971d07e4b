use core::fmt;

use crate::Node;
use crate::ops::{Map, Record, Sequence};

// -----------------------------------------------------------------------------
// Kind

/// A pure enumeration of the shapes a [`Node`] can take.
///
/// The set is closed: every target value is exactly one of these at any
/// resolution step. `Map` and `Sequence` form the keyed/indexed access
/// capability; `Record` is the named-field capability; `Null` and `Opaque`
/// support no access at all.
///
/// # Examples
///
/// ```
/// use delve::{Node, ops::NodeKind};
///
/// assert_eq!(vec![1, 2, 3].kind(), NodeKind::Sequence);
/// assert_eq!(10_i32.kind(), NodeKind::Opaque);
/// assert_eq!(None::<i32>.kind(), NodeKind::Null);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An absent value, such as `None`.
    Null,
    /// A keyed container.
    Map,
    /// An indexable ordered container.
    Sequence,
    /// A structured value with named fields.
    Record,
    /// A leaf value with no access capability.
    Opaque,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Map => "map",
            Self::Sequence => "sequence",
            Self::Record => "record",
            Self::Opaque => "opaque",
        })
    }
}

// -----------------------------------------------------------------------------
// Kind reference

/// An immutable enumeration of the shapes a [`Node`] can take, carrying the
/// capability trait object for the kinds that have one.
///
/// Returned by [`Node::node_ref`]; this is the type-safe capability probe the
/// resolver dispatches on.
///
/// # Examples
///
/// ```
/// use delve::{Node, ops::{NodeRef, Sequence}};
///
/// let vec = vec![1, 2, 3];
/// let NodeRef::Sequence(seq) = vec.node_ref() else {
///     unreachable!()
/// };
/// assert_eq!(seq.len(), 3);
/// ```
#[derive(Clone, Copy)]
pub enum NodeRef<'a> {
    /// An absent value.
    Null,
    /// A keyed container.
    Map(&'a dyn Map),
    /// An indexable ordered container.
    Sequence(&'a dyn Sequence),
    /// A structured value with named fields.
    Record(&'a dyn Record),
    /// A leaf value.
    Opaque(&'a dyn Node),
}

impl NodeRef<'_> {
    /// Returns the [`NodeKind`] of this reference.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Map(_) => NodeKind::Map,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Record(_) => NodeKind::Record,
            Self::Opaque(_) => NodeKind::Opaque,
        }
    }
}
