//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Class)]` | on struct | Polymorphic dispatch type |
//! | `#[derive(Value)]` | on struct/enum | Exact-identity dispatch type |

mod class;
mod value;

pub use class::expand_derive_class;
pub use value::expand_derive_value;
