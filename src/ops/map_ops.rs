use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use crate::Node;
use crate::ops::{NodeKind, NodeRef};

// -----------------------------------------------------------------------------
// Map interface

/// A keyed container: the mapping capability of a [`Node`].
///
/// Maps are keyed by strings, by integers, or (for [`DynamicMap`]) both.
/// The two lookup methods report their misses independently, and the
/// distinction is load-bearing for the resolver: an absent *integer* key may
/// still be reachable as a numeric-*string* key, while a string-keyed lookup
/// miss is final.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use delve::ops::Map;
///
/// let mut map = BTreeMap::new();
/// map.insert("key".to_string(), 42);
/// let map_ref: &dyn Map = &map;
///
/// assert!(map_ref.get("key").is_some());
/// assert!(map_ref.get("missing").is_none());
/// assert!(map_ref.get_index(0).is_none()); // not keyed by integers
/// ```
pub trait Map: Node {
    /// Returns a reference to the value associated with the given string key.
    ///
    /// Returns `None` if the key is not present or the container is not
    /// keyed by strings.
    fn get(&self, key: &str) -> Option<&dyn Node>;

    /// Returns a reference to the value associated with the given integer key.
    ///
    /// Returns `None` if the key is not present or the container is not
    /// keyed by integers.
    fn get_index(&self, key: u64) -> Option<&dyn Node>;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns an iterator over the entries of the map.
    fn iter(&self) -> Box<dyn Iterator<Item = (KeyRef<'_>, &dyn Node)> + '_>;
}

// -----------------------------------------------------------------------------
// Key references

/// A borrowed map key, as yielded by [`Map::iter`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum KeyRef<'a> {
    /// A string key.
    Str(&'a str),
    /// An integer key, widened so every supported key type fits.
    Int(i128),
}

impl fmt::Debug for KeyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(key) => fmt::Debug::fmt(key, f),
            Self::Int(key) => fmt::Display::fmt(key, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Owned keys for dynamic maps

/// An owned key of a [`DynamicMap`]: a position-like integer or a name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// An integer key.
    Index(u64),
    /// A string key.
    Name(String),
}

impl MapKey {
    fn key_ref(&self) -> KeyRef<'_> {
        match self {
            Self::Index(key) => KeyRef::Int(i128::from(*key)),
            Self::Name(key) => KeyRef::Str(key),
        }
    }
}

impl From<u64> for MapKey {
    #[inline]
    fn from(key: u64) -> Self {
        Self::Index(key)
    }
}

impl From<usize> for MapKey {
    #[inline]
    fn from(key: usize) -> Self {
        Self::Index(key as u64)
    }
}

impl From<&str> for MapKey {
    #[inline]
    fn from(key: &str) -> Self {
        Self::Name(key.to_owned())
    }
}

impl From<String> for MapKey {
    #[inline]
    fn from(key: String) -> Self {
        Self::Name(key)
    }
}

// -----------------------------------------------------------------------------
// Dynamic Map

/// A dynamic keyed container holding heterogeneous values.
///
/// `DynamicMap` stores `Box<dyn Node>` values under string or integer keys,
/// for map-shaped data whose value types differ per entry or are only known
/// at runtime. Statically shaped maps should prefer the plain collection
/// types (`BTreeMap`, `HashMap`), which implement [`Map`] directly.
///
/// # Examples
///
/// ```
/// use delve::{Resolve, ops::DynamicMap};
///
/// let mut map = DynamicMap::new();
/// map.insert("name", "launch");
/// map.insert("retries", 3_u32);
///
/// assert_eq!(*map.resolve_as::<u32>("retries").unwrap(), 3);
/// ```
#[derive(Debug, Default)]
pub struct DynamicMap {
    entries: BTreeMap<MapKey, Box<dyn Node>>,
}

impl DynamicMap {
    /// Creates an empty `DynamicMap`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a value under the given key, replacing any previous entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::ops::{DynamicMap, Map};
    ///
    /// let mut map = DynamicMap::new();
    /// map.insert("a", 1);
    /// map.insert(7_u64, "seven");
    ///
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn insert(&mut self, key: impl Into<MapKey>, value: impl Node) {
        self.entries.insert(key.into(), Box::new(value));
    }

    /// Inserts an already boxed value under the given key.
    pub fn insert_boxed(&mut self, key: impl Into<MapKey>, value: Box<dyn Node>) {
        self.entries.insert(key.into(), value);
    }
}

impl Node for DynamicMap {
    #[inline]
    fn kind(&self) -> NodeKind {
        NodeKind::Map
    }

    #[inline]
    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Map(self)
    }
}

impl Map for DynamicMap {
    fn get(&self, key: &str) -> Option<&dyn Node> {
        self.entries
            .get(&MapKey::Name(key.to_owned()))
            .map(|value| &**value)
    }

    fn get_index(&self, key: u64) -> Option<&dyn Node> {
        self.entries.get(&MapKey::Index(key)).map(|value| &**value)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (KeyRef<'_>, &dyn Node)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (key.key_ref(), &**value as &dyn Node)),
        )
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_map_string_and_integer_keys() {
        let mut map = DynamicMap::new();
        map.insert("a", 1_i32);
        map.insert(3_u64, "third");

        let map_ref: &dyn Map = &map;
        assert_eq!(map_ref.len(), 2);
        assert_eq!(
            map_ref.get("a").and_then(|v| v.downcast_ref::<i32>()),
            Some(&1)
        );
        assert_eq!(
            map_ref
                .get_index(3)
                .and_then(|v| v.downcast_ref::<&'static str>()),
            Some(&"third")
        );
        assert!(map_ref.get("missing").is_none());
        assert!(map_ref.get_index(0).is_none());
    }

    #[test]
    fn dynamic_map_replaces_on_insert() {
        let mut map = DynamicMap::new();
        map.insert("a", 1_i32);
        map.insert("a", 2_i32);

        let map_ref: &dyn Map = &map;
        assert_eq!(map_ref.len(), 1);
        assert_eq!(
            map_ref.get("a").and_then(|v| v.downcast_ref::<i32>()),
            Some(&2)
        );
    }
}
