use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use crate::Node;
use crate::ops::{NodeKind, NodeRef};

/// Implements [`Node`] for leaf types with no access capability.
macro_rules! impl_node_opaque {
    ($($ty:ty),+ $(,)?) => {$(
        impl Node for $ty {
            #[inline]
            fn kind(&self) -> NodeKind {
                NodeKind::Opaque
            }

            #[inline]
            fn node_ref(&self) -> NodeRef<'_> {
                NodeRef::Opaque(self)
            }

            #[inline]
            fn node_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    )+};
}

impl_node_opaque!(bool, char);
impl_node_opaque!(i8, i16, i32, i64, i128, isize);
impl_node_opaque!(u8, u16, u32, u64, u128, usize);
impl_node_opaque!(f32, f64);
impl_node_opaque!(String, &'static str, Cow<'static, str>);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_opaque() {
        assert_eq!(10_i32.kind(), NodeKind::Opaque);
        assert_eq!(true.kind(), NodeKind::Opaque);
        assert_eq!("text".kind(), NodeKind::Opaque);
        assert_eq!(String::from("text").kind(), NodeKind::Opaque);
    }
}
