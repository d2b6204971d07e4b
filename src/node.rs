use core::any::{Any, TypeId};
use core::fmt;

use crate::ops::{NodeKind, NodeRef};

// -----------------------------------------------------------------------------
// Node

/// The foundational trait for values that path resolution can walk.
///
/// A `Node` is one of a closed set of shapes ([`NodeKind`]): a keyed map, an
/// indexable sequence, a record with named fields, a null, or an opaque leaf.
/// [`node_ref`] exposes the shape together with its capability trait object,
/// which is what the resolver dispatches on — there is no reflection and no
/// duck typing involved.
///
/// # Implementations
///
/// The crate implements `Node` for scalars, `Option`, the common `alloc`/
/// `std` containers, and (with the `json` feature) `serde_json::Value`.
/// Structs opt in through [the derive macro](crate::derive::Node); containers
/// with per-element runtime types use [`DynamicSeq`] and [`DynamicMap`].
///
/// # Examples
///
/// ```
/// use delve::{Node, ops::NodeKind};
///
/// let value = 10_i32;
/// let node: &dyn Node = &value;
///
/// assert_eq!(node.kind(), NodeKind::Opaque);
/// assert_eq!(node.downcast_ref::<i32>(), Some(&10));
/// ```
///
/// [`node_ref`]: Node::node_ref
/// [`DynamicSeq`]: crate::ops::DynamicSeq
/// [`DynamicMap`]: crate::ops::DynamicMap
pub trait Node: Send + Sync + Any {
    /// Casts this type to a node trait object.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Node;
    ///
    /// let x = 32;
    /// let node: &dyn Node = x.as_node();
    /// ```
    #[inline(always)]
    fn as_node(&self) -> &dyn Node
    where
        Self: Sized,
    {
        self
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// Calling [`Any::type_id`] through a box or other wrapper returns the
    /// container's type id rather than the value's; this method always
    /// reports the value's.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the shape of this value as a pure enumeration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Node, ops::NodeKind};
    ///
    /// assert_eq!(vec![1, 2, 3].kind(), NodeKind::Sequence);
    /// ```
    fn kind(&self) -> NodeKind;

    /// Returns the shape of this value, carrying the capability trait object
    /// for the kinds that have one.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Node, ops::NodeRef};
    ///
    /// let vec = vec![1, 2, 3];
    /// assert!(matches!(vec.node_ref(), NodeRef::Sequence(_)));
    /// ```
    fn node_ref(&self) -> NodeRef<'_>;

    /// Debug formatter for the value.
    ///
    /// The default implementation renders containers structurally through
    /// their capability interfaces; opaque implementations are expected to
    /// forward to their own [`Debug`](fmt::Debug).
    fn node_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node_ref() {
            NodeRef::Map(map) => crate::impls::map_debug(map, f),
            NodeRef::Sequence(seq) => crate::impls::seq_debug(seq, f),
            NodeRef::Record(record) => crate::impls::record_debug(record, f),
            NodeRef::Null => f.write_str("null"),
            NodeRef::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

// -----------------------------------------------------------------------------
// Trait object methods

impl dyn Node {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Node;
    ///
    /// let value = 10_i32;
    /// let node: &dyn Node = &value;
    ///
    /// assert!(node.is::<i32>());
    /// assert!(!node.is::<u32>());
    /// ```
    #[inline]
    pub fn is<T: Node>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Node;
    ///
    /// let value = 10_i32;
    /// let node: &dyn Node = &value;
    ///
    /// assert_eq!(node.downcast_ref::<i32>(), Some(&10));
    /// ```
    #[inline]
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }
}

impl fmt::Debug for dyn Node {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node_debug(f)
    }
}
