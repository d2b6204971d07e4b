//! Provide [`Node`] implementations for common types, and helpers for
//! writing manual implementations.
//!
//! ## Implemented Menu
//!
//! - basic:
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `bool`, `char`
//!     - `&'static str`, `String`, `Cow<'static, str>`
//! - core:
//!     - `Option<T>` (`None` is the null shape; `Some` is transparent)
//! - alloc:
//!     - `Vec<T>`, `VecDeque<T>`, `[T; N]`
//!     - `BTreeMap<K, V>` for string and integer key types
//! - std: (`std` feature)
//!     - `HashMap<K, V>` for string and integer key types
//!
//! ## Helpers
//!
//! - [`map_debug`] / [`seq_debug`] / [`record_debug`]: structural debug
//!   formatting over the capability interfaces, used by the default
//!   [`Node::node_debug`](crate::Node::node_debug).
//!
//! [`Node`]: crate::Node

use core::fmt;

use crate::ops::{Map, Record, Sequence};

// -----------------------------------------------------------------------------
// Modules

mod maps;
mod option;
mod scalar;
mod sequences;

// -----------------------------------------------------------------------------
// Debug helpers

/// Formats a map through its [`Map`] interface.
pub fn map_debug(map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_map();
    for (key, value) in map.iter() {
        debug.entry(&key, &value);
    }
    debug.finish()
}

/// Formats a sequence through its [`Sequence`] interface.
pub fn seq_debug(seq: &dyn Sequence, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_list();
    for index in 0..seq.len() {
        if let Some(value) = seq.get(index) {
            debug.entry(&value);
        }
    }
    debug.finish()
}

/// Formats a record through its [`Record`] interface.
pub fn record_debug(record: &dyn Record, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(record.type_name());
    for index in 0..record.field_len() {
        if let (Some(name), Some(value)) = (record.name_at(index), record.field_at(index)) {
            debug.field(name, &value);
        }
    }
    debug.finish()
}
