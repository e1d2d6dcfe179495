//! Registration Sugar
//!
//! `multimethod!` declares a lazily built multimethod together with its
//! implementations. Two forms:
//!
//! | Form | Generates |
//! |------|-----------|
//! | `fn name(a: Base, ..) -> R { .. }` | `static NAME` + `fn name(a, ..)` |
//! | `static NAME -> R { .. }` | open `static NAME` only (any arity) |
//!
//! Entries are comma-separated closures or fn paths; `fallback <expr>` marks
//! the zero-argument fallback.

// =============================================================================
// multimethod!
// =============================================================================

/// Declare a multimethod and its implementations.
///
/// # Example
///
/// ```ignore
/// multimethod! {
///     pub fn collide(a: dyn Object, b: dyn Object) -> &'static str {
///         |_: &Asteroid, _: &Asteroid| "traverse",
///         |_: &Asteroid, _: &Spaceship| "boom",
///         |t: &dyn Object, a: &Asteroid| collide(a, t),
///         fallback || "miss",
///     }
/// }
///
/// assert_eq!(collide(&ship, &rock), Ok("boom"));
/// assert_eq!(COLLIDE.get().len(), 3);
/// ```
#[macro_export]
macro_rules! multimethod {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ( $($arg:ident : $base:ty),* $(,)? ) -> $ret:ty {
            $($body:tt)*
        }
    ) => {
        $crate::paste::paste! {
            $vis static [<$name:upper>]: $crate::LazyMultimethod<$ret> = $crate::LazyMultimethod::new(
                stringify!($name),
                |builder| $crate::__multimethod_methods!(builder $(.base::<$base>())* ; $($body)*),
            );

            $(#[$meta])*
            $vis fn $name<'a>(
                $($arg: impl $crate::IntoArg<'a>),*
            ) -> ::core::result::Result<$ret, $crate::NotImplemented> {
                [<$name:upper>].call(($($arg,)*))
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident -> $ret:ty {
            $($body:tt)*
        }
    ) => {
        $crate::paste::paste! {
            $(#[$meta])*
            $vis static $name: $crate::LazyMultimethod<$ret> = $crate::LazyMultimethod::new(
                stringify!([<$name:lower>]),
                |builder| $crate::__multimethod_methods!(builder ; $($body)*),
            );
        }
    };
}

/// Internal tt-muncher for `multimethod!` entries - DO NOT USE DIRECTLY.
#[macro_export]
#[doc(hidden)]
macro_rules! __multimethod_methods {
    ($builder:expr ;) => {
        $builder
    };
    ($builder:expr ; fallback $func:expr $(, $($rest:tt)*)?) => {
        $crate::__multimethod_methods!($builder.fallback($func) ; $($($rest)*)?)
    };
    ($builder:expr ; $func:expr $(, $($rest:tt)*)?) => {
        $crate::__multimethod_methods!($builder.method($func) ; $($($rest)*)?)
    };
}
