#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and `delve` in doc
// testing and derive output. An `extern self` ensures `delve` can be used as
// an alias for `crate`.
extern crate self as delve;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod node;

pub mod access;
pub mod impls;
pub mod ops;

#[cfg(feature = "json")]
pub mod json;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use access::{Path, PathSpec, Resolve, ResolveError, resolve};
pub use node::Node;

pub use delve_derive as derive;
