//! Type Relation Utilities
//!
//! - [`class`]: class hierarchy (`ClassInfo`, `Object`, `Class`)
//! - [`desc`]: type descriptors, relations, signatures
//! - [`view`]: the `Dispatch` capability and type-erased views
//! - [`value`]: exact-identity value types

pub mod class;
pub mod desc;
pub mod value;
pub mod view;

pub use class::{Ancestors, Class, ClassInfo, Object};
pub use desc::{Access, Kind, ParamDesc, Relation, Signature, TypeDesc};
pub use view::{Dispatch, View, ViewMut};
