//! Provide path-based access into nested data.
//!
//! This module turns a path specification into [`Segment`]s and resolves
//! them, one level per segment, against a root [`Node`]. There are two
//! complementary APIs exposed here:
//!
//! - [`resolve`] and the [`Resolve`] trait: parse-and-resolve in a single
//!   call, suitable for one-off lookups.
//! - [`Path`]: a parsed, reusable path optimized for repeated queries — the
//!   specification is parsed once and then resolved without additional
//!   parsing or allocation.
//!
//! The module also exposes the [`PathSpec`] abstraction, which lets you
//! provide custom path representations, and the error types for detailed
//! reporting ([`ParseError`], [`AccessError`], [`ResolveError`]).
//!
//! # Segment interpretation
//!
//! A segment is opaque text; each location decides what it means:
//!
//! - all-digit segments index sequences and integer-keyed maps. An
//!   out-of-range index is a definitive miss; an absent integer key retries
//!   the segment as a numeric-string key.
//! - any segment is a string key against a map.
//! - field access applies only to locations with no keyed or indexed
//!   capability, such as derived records.
//!
//! # Examples
//!
//! `Resolve`:
//!
//! ```
//! use std::collections::BTreeMap;
//! use delve::Resolve;
//!
//! let mut map = BTreeMap::new();
//! map.insert("items".to_string(), vec![3_i32, 5]);
//!
//! let value = map.resolve_as::<i32>("items.1").unwrap();
//! assert_eq!(*value, 5);
//! ```
//!
//! `Path`:
//!
//! ```
//! use std::collections::BTreeMap;
//! use delve::Path;
//!
//! let mut map = BTreeMap::new();
//! map.insert("items".to_string(), vec![3_i32, 5]);
//!
//! let path = Path::parse_static("items.0").unwrap();
//! assert_eq!(*path.resolve_as::<i32>(&map).unwrap(), 3);
//! assert_eq!(*path.resolve_as::<i32>(&map).unwrap(), 3); // reuse
//! ```
//!
//! [`Node`]: crate::Node

// -----------------------------------------------------------------------------
// Modules

mod path;
mod resolve;
mod segment;

// -----------------------------------------------------------------------------
// Exports

pub use path::{ParseError, PathSpec};
pub use resolve::{Path, Resolve, ResolveError, resolve};
pub use segment::{AccessError, AccessErrorKind, Segment};

// -----------------------------------------------------------------------------
// Tests
