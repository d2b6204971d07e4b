use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;

use crate::Node;
use crate::ops::{KeyRef, Map, NodeKind, NodeRef};

#[cfg(feature = "std")]
use std::collections::HashMap;

/// Implements [`Node`] and [`Map`] for a map container per key type.
///
/// String-keyed maps answer `get` and never `get_index`; integer-keyed maps
/// answer `get_index` (narrowing the key with `try_from`) and never `get`.
macro_rules! impl_node_map {
    ($map:ident, str: $($key:ty),+ $(,)?) => {$(
        impl<V: Node> Node for $map<$key, V> {
            #[inline]
            fn kind(&self) -> NodeKind {
                NodeKind::Map
            }

            #[inline]
            fn node_ref(&self) -> NodeRef<'_> {
                NodeRef::Map(self)
            }
        }

        impl<V: Node> Map for $map<$key, V> {
            fn get(&self, key: &str) -> Option<&dyn Node> {
                $map::get(self, key).map(|value| value as &dyn Node)
            }

            fn get_index(&self, _key: u64) -> Option<&dyn Node> {
                None
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (KeyRef<'_>, &dyn Node)> + '_> {
                Box::new($map::iter(self).map(|(key, value)| {
                    (KeyRef::Str(key.borrow()), value as &dyn Node)
                }))
            }
        }
    )+};
    ($map:ident, int: $($key:ty),+ $(,)?) => {$(
        impl<V: Node> Node for $map<$key, V> {
            #[inline]
            fn kind(&self) -> NodeKind {
                NodeKind::Map
            }

            #[inline]
            fn node_ref(&self) -> NodeRef<'_> {
                NodeRef::Map(self)
            }
        }

        impl<V: Node> Map for $map<$key, V> {
            fn get(&self, _key: &str) -> Option<&dyn Node> {
                None
            }

            fn get_index(&self, key: u64) -> Option<&dyn Node> {
                <$key>::try_from(key)
                    .ok()
                    .and_then(|key| $map::get(self, &key))
                    .map(|value| value as &dyn Node)
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (KeyRef<'_>, &dyn Node)> + '_> {
                Box::new($map::iter(self).map(|(key, value)| {
                    (KeyRef::Int(*key as i128), value as &dyn Node)
                }))
            }
        }
    )+};
}

impl_node_map!(BTreeMap, str: String, &'static str, Cow<'static, str>);
impl_node_map!(BTreeMap, int: u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(feature = "std")]
impl_node_map!(HashMap, str: String, &'static str, Cow<'static, str>);
#[cfg(feature = "std")]
impl_node_map!(HashMap, int: u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_keyed_map_answers_string_lookups_only() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1_i32);
        let map_ref: &dyn Map = &map;

        assert_eq!(
            map_ref.get("a").and_then(|v| v.downcast_ref::<i32>()),
            Some(&1)
        );
        assert!(map_ref.get("b").is_none());
        assert!(map_ref.get_index(0).is_none());
    }

    #[test]
    fn integer_keyed_map_answers_integer_lookups_only() {
        let mut map = BTreeMap::new();
        map.insert(5_u64, "five");
        let map_ref: &dyn Map = &map;

        assert_eq!(
            map_ref
                .get_index(5)
                .and_then(|v| v.downcast_ref::<&'static str>()),
            Some(&"five")
        );
        assert!(map_ref.get_index(6).is_none());
        assert!(map_ref.get("5").is_none());
    }

    #[test]
    fn narrow_integer_keys_reject_out_of_domain_lookups() {
        let mut map = BTreeMap::new();
        map.insert(200_u8, 1_i32);
        let map_ref: &dyn Map = &map;

        assert!(map_ref.get_index(200).is_some());
        // 300 cannot be a u8 key, so the integer lookup simply misses.
        assert!(map_ref.get_index(300).is_none());
    }

    #[cfg(feature = "std")]
    #[test]
    fn hash_map_lookups() {
        let mut map = HashMap::new();
        map.insert("a", 1_i32);
        let map_ref: &dyn Map = &map;

        assert_eq!(
            map_ref.get("a").and_then(|v| v.downcast_ref::<i32>()),
            Some(&1)
        );
        assert_eq!(map_ref.len(), 1);
    }
}
