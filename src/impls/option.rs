use core::fmt;

use crate::Node;
use crate::ops::{NodeKind, NodeRef};

// `None` is the null shape; `Some` is transparent, so optional values nest
// without adding a level to the path.
impl<T: Node> Node for Option<T> {
    #[inline]
    fn kind(&self) -> NodeKind {
        match self {
            Some(value) => value.kind(),
            None => NodeKind::Null,
        }
    }

    #[inline]
    fn node_ref(&self) -> NodeRef<'_> {
        match self {
            Some(value) => value.node_ref(),
            None => NodeRef::Null,
        }
    }

    #[inline]
    fn node_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.node_debug(f),
            None => f.write_str("null"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    #[test]
    fn none_is_null() {
        assert_eq!(None::<i32>.kind(), NodeKind::Null);
        assert!(matches!(None::<i32>.node_ref(), NodeRef::Null));
    }

    #[test]
    fn some_is_transparent() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1_i32);
        let value = Some(map);

        assert_eq!(value.kind(), NodeKind::Map);
        assert!(matches!(value.node_ref(), NodeRef::Map(_)));
    }
}
