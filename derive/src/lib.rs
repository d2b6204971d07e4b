//! Derive support for the `delve` node model.
//!
//! See [`Node`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;

// -----------------------------------------------------------------------------
// Modules

mod record;

// -----------------------------------------------------------------------------
// Macros

/// Derives the `Node` and `Record` traits for a struct with named fields,
/// exposing each field to path resolution under its declared name.
///
/// ```rust, ignore
/// #[derive(Node)]
/// struct Listener {
///     host: String,
///     port: u16,
/// }
/// ```
///
/// Every field type must itself implement `Node`. Type parameters of the
/// struct receive a `Node` bound.
///
/// # Field Attributes
///
/// ## `#[node(skip)]`
///
/// Hides a field from resolution; paths naming it miss like any other
/// unknown field.
///
/// ```rust, ignore
/// #[derive(Node)]
/// struct Job {
///     name: String,
///     #[node(skip)]
///     scratch: Workspace,
/// }
/// ```
///
/// A skipped field's type does not need to implement `Node`.
///
/// # Limitations
///
/// Tuple structs, unit structs, enums, and unions are rejected: the record
/// shape of the node model is named fields. Enum-shaped data is better
/// modeled as a map or with `DynamicMap`.
#[proc_macro_derive(Node, attributes(node))]
pub fn derive_node(input: TokenStream) -> TokenStream {
    record::expand(syn::parse_macro_input!(input as syn::DeriveInput))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
