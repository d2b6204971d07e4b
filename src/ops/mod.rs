//! Provide interfaces and dynamic types for the target-value model.
//!
//! ## Menu
//!
//! ### Interface
//!
//! The following are the subtraits of [`Node`], which expose the access
//! capability of each node kind.
//!
//! - [`Map`]: For keyed containers (e.g. `BTreeMap<String, i32>`).
//! - [`Sequence`]: For indexable ordered containers (e.g. `Vec<i32>`).
//! - [`Record`]: For structured values with named fields.
//!
//! A value is one of the closed set of [`NodeKind`]s; the resolver probes the
//! keyed/indexed capability ([`Map`]/[`Sequence`]) before it ever considers
//! named-field access ([`Record`]).
//!
//! ### Dynamic Type
//!
//! The dynamic types hold heterogeneous children behind `Box<dyn Node>`,
//! for data whose shape is only known at runtime.
//!
//! - [`DynamicSeq`]: representing sequence data, similar to `Vec<Box<dyn Node>>`.
//! - [`DynamicMap`]: representing map data keyed by strings or integers.
//!
//! [`Node`]: crate::Node

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod map_ops;
mod record_ops;
mod seq_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{NodeKind, NodeRef};

pub use map_ops::{DynamicMap, KeyRef, Map, MapKey};
pub use record_ops::Record;
pub use seq_ops::{DynamicSeq, Sequence};
