//! Provide [`Node`] implementations for [`serde_json::Value`].
//!
//! JSON is the most common carrier of the heterogeneous nested data this
//! crate targets, so `Value` is a first-class resolution target:
//!
//! - `Null` is the null shape,
//! - `Bool`, `Number`, and `String` are opaque leaves,
//! - `Array` is a sequence (through the generic `Vec<Value>` implementation),
//! - `Object` is a string-keyed map.
//!
//! JSON objects are keyed by strings only, so an all-digit segment against an
//! object never finds an integer key and falls back to the raw text, which
//! gives `{"0123": 1}` its natural behavior under the path `"0123"`.
//!
//! # Examples
//!
//! ```
//! use delve::Resolve;
//! use serde_json::json;
//!
//! let data = json!({ "a": { "b": { "c": 123 } } });
//!
//! let found = data.resolve("a.b.c").unwrap();
//! assert_eq!(found.downcast_ref::<serde_json::Value>(), Some(&json!(123)));
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use serde_json::Value;

use crate::Node;
use crate::ops::{KeyRef, Map, NodeKind, NodeRef};

impl Node for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Null => NodeKind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Opaque,
            Value::Array(_) => NodeKind::Sequence,
            Value::Object(_) => NodeKind::Map,
        }
    }

    fn node_ref(&self) -> NodeRef<'_> {
        match self {
            Value::Null => NodeRef::Null,
            Value::Array(values) => NodeRef::Sequence(values),
            Value::Object(map) => NodeRef::Map(map),
            _ => NodeRef::Opaque(self),
        }
    }

    #[inline]
    fn node_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Node for serde_json::Map<String, Value> {
    #[inline]
    fn kind(&self) -> NodeKind {
        NodeKind::Map
    }

    #[inline]
    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Map(self)
    }

    #[inline]
    fn node_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Map for serde_json::Map<String, Value> {
    fn get(&self, key: &str) -> Option<&dyn Node> {
        serde_json::Map::get(self, key).map(|value| value as &dyn Node)
    }

    fn get_index(&self, _key: u64) -> Option<&dyn Node> {
        None
    }

    fn len(&self) -> usize {
        serde_json::Map::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (KeyRef<'_>, &dyn Node)> + '_> {
        Box::new(
            serde_json::Map::iter(self)
                .map(|(key, value)| (KeyRef::Str(key.as_str()), value as &dyn Node)),
        )
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessErrorKind, ResolveError};
    use crate::{Resolve, resolve};
    use serde_json::json;

    #[test]
    fn kinds_follow_the_json_shape() {
        assert_eq!(json!(null).kind(), NodeKind::Null);
        assert_eq!(json!(true).kind(), NodeKind::Opaque);
        assert_eq!(json!(1.5).kind(), NodeKind::Opaque);
        assert_eq!(json!("s").kind(), NodeKind::Opaque);
        assert_eq!(json!([1]).kind(), NodeKind::Sequence);
        assert_eq!(json!({}).kind(), NodeKind::Map);
    }

    #[test]
    fn nested_objects_and_arrays() {
        let data = json!([{ "li": [{ "foo": "bar" }] }]);
        let found = data.resolve("0.li.0.foo").unwrap();
        assert_eq!(found.downcast_ref::<Value>(), Some(&json!("bar")));
    }

    #[test]
    fn numeric_string_keys_fall_back() {
        let data = json!({ "0123": 1 });
        let found = data.resolve("0123").unwrap();
        assert_eq!(found.downcast_ref::<Value>(), Some(&json!(1)));
    }

    #[test]
    fn out_of_range_is_definitive() {
        let data = json!([1, 2]);
        let err = data.resolve("2").unwrap_err();
        let ResolveError::Access(access) = err else {
            panic!("expected an access error");
        };
        assert_eq!(access.kind(), &AccessErrorKind::OutOfRange { len: 2 });
    }

    #[test]
    fn null_root_and_defaults() {
        let data = json!(null);
        assert_eq!(
            resolve(&data, "a.b", None).unwrap_err(),
            ResolveError::NullTarget
        );

        let fallback = json!("fallback");
        let found = resolve(&data, "a.b", Some(&fallback)).unwrap();
        assert_eq!(found.downcast_ref::<Value>(), Some(&json!("fallback")));
    }

    #[test]
    fn intermediate_null_is_an_access_miss() {
        let data = json!({ "a": null });
        let err = data.resolve("a.b").unwrap_err();
        let ResolveError::Access(access) = err else {
            panic!("expected an access error");
        };
        assert_eq!(
            access.kind(),
            &AccessErrorKind::Unsupported(NodeKind::Null)
        );
    }

    #[test]
    fn json_specs_resolve_like_strings() {
        let data = json!({ "li": [10, 20] });

        let spec = json!("li.1");
        let found = resolve(&data, &spec as &dyn Node, None).unwrap();
        assert_eq!(found.downcast_ref::<Value>(), Some(&json!(20)));

        let spec = json!(["li", 1]);
        let found = resolve(&data, &spec as &dyn Node, None).unwrap();
        assert_eq!(found.downcast_ref::<Value>(), Some(&json!(20)));
    }
}
