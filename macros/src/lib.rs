//! Procedural macros for tola-multi
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Class)]` | struct | Join a dispatch class hierarchy |
//! | `#[derive(Value)]` | struct/enum | Dispatch on exact type identity |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Class)]
//! struct Vehicle;
//!
//! #[derive(Class)]
//! struct Car {
//!     #[class(base)]
//!     vehicle: Vehicle,
//!     seats: u8,
//! }
//!
//! #[derive(Value)]
//! struct Meters(f64);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations (Two-tier: common / user)
// =============================================================================

mod common;
mod user;

// =============================================================================
// Derive Macros (user/)
// =============================================================================

/// Derive `Object`, `Class` and `Dispatch` for a struct.
///
/// At most one field may carry `#[class(base)]`; its type becomes the parent
/// class. A struct without a base field is a hierarchy root.
///
/// Generic structs are rejected: a class needs one static descriptor.
#[proc_macro_derive(Class, attributes(class))]
pub fn derive_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_class(input).into()
}

/// Derive `Dispatch` for a plain value type (exact identity matching).
#[proc_macro_derive(Value)]
pub fn derive_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_value(input).into()
}
