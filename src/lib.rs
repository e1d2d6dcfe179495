#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![allow(clippy::crate_in_macro_def)]

// Feature flags handled:
// - std: default, LazyMultimethod statics and the multimethod! macro (OnceLock)
// - derive: default, #[derive(Class)] and #[derive(Value)]

//! # tola-multi
//!
//! Runtime multiple dispatch for Rust.
//!
//! **Pick an implementation from the dynamic types of all arguments.**
//!
//! ## Architecture
//!
//! A *multimethod* is a named operation with several *implementations*, each
//! declared for a tuple of parameter types. At call time every argument is
//! wrapped in an adapter, and the implementations are tried most specific
//! first until one accepts all arguments.
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Types                                                   |
//! |  - ClassInfo / Object / Class, TypeDesc, Relation, Dispatch       |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Arguments & Methods                                     |
//! |  - Arg (shared / exclusive / inert), Param, Implementation        |
//! |  - Record -> Outcome { Matched, NoMatch, Skip, Raised }           |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Ranking & Dispatch                                      |
//! |  - compare / rank, Builder -> Multimethod, LazyMultimethod        |
//! |  - multimethod! sugar                                             |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Specificity
//!
//! 1. Types, left to right: the first position where one declaration derives
//!    from the other decides.
//! 2. Arity: more parameters is more specific.
//! 3. Access: `&mut T` is more specific than `&T` for the same `T`.
//! 4. Registration order.
//!
//! A `&mut T` parameter never accepts an argument passed as `&T`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tola_multi::prelude::*;
//!
//! #[derive(Class)]
//! struct Thing;
//!
//! #[derive(Class)]
//! struct Asteroid {
//!     #[class(base)]
//!     thing: Thing,
//! }
//!
//! #[derive(Class)]
//! struct Spaceship {
//!     #[class(base)]
//!     thing: Thing,
//! }
//!
//! multimethod! {
//!     fn collide(a: dyn Object, b: dyn Object) -> &'static str {
//!         |_: &Asteroid, _: &Asteroid| "traverse",
//!         |_: &Asteroid, _: &Spaceship| "boom",
//!         |t: &dyn Object, a: &Asteroid| collide(a, t),
//!     }
//! }
//!
//! let rock = Asteroid { thing: Thing };
//! let ship = Spaceship { thing: Thing };
//! assert_eq!(collide(&ship, &rock), Ok("boom"));
//! ```

// Allow `::tola_multi` to work inside the crate itself
extern crate self as tola_multi;

// Records, signatures and errors allocate; only lazy statics need std
extern crate alloc;

// Re-export paste for the multimethod! macro
pub use paste;

/// Maximum number of dispatch positions of one implementation.
pub const MAX_ARITY: usize = 6;

// =============================================================================
// Layer 0: Types (no dependencies)
// =============================================================================
pub mod types;

// =============================================================================
// Layer 1: Arguments & Method Records
// =============================================================================
pub mod arg;
pub mod error;
pub mod method;

// =============================================================================
// Layer 2: Ranking & Dispatch
// =============================================================================
pub mod dispatch;
pub mod rank;

// Syntax macros (multimethod!)
#[cfg(feature = "std")]
pub mod syntax_macros;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use arg::{Arg, IntoArg, IntoArgs};
pub use dispatch::{Builder, Multimethod};
#[cfg(feature = "std")]
pub use dispatch::LazyMultimethod;
pub use error::{DefinitionError, NotImplemented};
pub use method::{Fallback, Implementation, IntoOutcome, Method, Outcome, Param, Skip, next_method};
pub use types::{
    Access, Class, ClassInfo, Dispatch, Kind, Object, ParamDesc, Relation, Signature, TypeDesc,
    View, ViewMut,
};

// Re-export derives
#[cfg(feature = "derive")]
pub use macros::{Class, Value};

// =============================================================================
// Declarative Macro Bridge for #[derive(Class)] / #[derive(Value)]
// =============================================================================
//
// The derives only emit a call to one of these macros, so that
// concat!(module_path!(), ...) expands at the user's definition site.

/// Internal macro bridge - DO NOT USE DIRECTLY.
/// Use #[derive(Class)] instead.
#[macro_export]
#[doc(hidden)]
macro_rules! __impl_class {
    ($ty:ident, $name:literal) => {
        impl $crate::Object for $ty {
            fn class_info(&self) -> &'static $crate::ClassInfo {
                <$ty as $crate::Class>::class()
            }

            fn upcast_ref(&self, target: ::core::any::TypeId) -> ::core::option::Option<&dyn ::core::any::Any> {
                (target == ::core::any::TypeId::of::<$ty>()).then_some(self as &dyn ::core::any::Any)
            }

            fn upcast_mut(&mut self, target: ::core::any::TypeId) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                (target == ::core::any::TypeId::of::<$ty>()).then_some(self as &mut dyn ::core::any::Any)
            }
        }

        $crate::__impl_class!(@class $ty, $name, ::core::option::Option::None);
    };

    ($ty:ident, $name:literal, $field:tt : $base:ty) => {
        impl $crate::Object for $ty {
            fn class_info(&self) -> &'static $crate::ClassInfo {
                <$ty as $crate::Class>::class()
            }

            fn upcast_ref(&self, target: ::core::any::TypeId) -> ::core::option::Option<&dyn ::core::any::Any> {
                if target == ::core::any::TypeId::of::<$ty>() {
                    ::core::option::Option::Some(self)
                } else {
                    <$base as $crate::Object>::upcast_ref(&self.$field, target)
                }
            }

            fn upcast_mut(&mut self, target: ::core::any::TypeId) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                if target == ::core::any::TypeId::of::<$ty>() {
                    ::core::option::Option::Some(self)
                } else {
                    <$base as $crate::Object>::upcast_mut(&mut self.$field, target)
                }
            }
        }

        $crate::__impl_class!(
            @class $ty, $name,
            ::core::option::Option::Some(<$base as $crate::Class>::class as fn() -> &'static $crate::ClassInfo)
        );
    };

    (@class $ty:ident, $name:literal, $parent:expr) => {
        impl $crate::Class for $ty {
            fn class() -> &'static $crate::ClassInfo {
                static INFO: $crate::ClassInfo =
                    $crate::ClassInfo::new::<$ty>(concat!(module_path!(), "::", $name), $parent);
                &INFO
            }
        }

        impl $crate::Dispatch for $ty {
            fn describe() -> $crate::TypeDesc {
                $crate::TypeDesc::class::<$ty>()
            }

            fn view(&self) -> $crate::View<'_> {
                $crate::View::Object(self)
            }

            fn view_mut(&mut self) -> $crate::ViewMut<'_> {
                $crate::ViewMut::Object(self)
            }

            fn narrow<'a>(view: $crate::View<'a>) -> ::core::option::Option<&'a Self> {
                $crate::types::class::narrow_ref(view)
            }

            fn narrow_mut<'a>(view: $crate::ViewMut<'a>) -> ::core::option::Option<&'a mut Self> {
                $crate::types::class::narrow_mut(view)
            }
        }
    };
}

/// Internal macro bridge - DO NOT USE DIRECTLY.
/// Use #[derive(Value)] instead.
#[macro_export]
#[doc(hidden)]
macro_rules! __impl_value {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Dispatch for $ty {
            fn describe() -> $crate::TypeDesc {
                $crate::TypeDesc::value::<$ty>()
            }

            fn view(&self) -> $crate::View<'_> {
                $crate::View::Value(self)
            }

            fn view_mut(&mut self) -> $crate::ViewMut<'_> {
                $crate::ViewMut::Value(self)
            }

            fn narrow<'a>(view: $crate::View<'a>) -> ::core::option::Option<&'a Self> {
                $crate::types::value::narrow_ref(view)
            }

            fn narrow_mut<'a>(view: $crate::ViewMut<'a>) -> ::core::option::Option<&'a mut Self> {
                $crate::types::value::narrow_mut(view)
            }
        }
    )*};
}

/// Common items for declaring and calling multimethods.
pub mod prelude {
    pub use crate::{
        Arg, Builder, Class, DefinitionError, Fallback, Multimethod, NotImplemented, Object, Skip,
        next_method,
    };
    #[cfg(feature = "std")]
    pub use crate::{LazyMultimethod, multimethod};
    #[cfg(feature = "derive")]
    pub use crate::Value;
}
