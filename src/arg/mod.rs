//! Argument Adapter
//!
//! One [`Arg`] wraps one actual call argument for the duration of a call. It
//! remembers whether the caller passed `&T` (shared) or `&mut T` (exclusive)
//! and narrows to a candidate's declared parameter type on request.
//!
//! ```text
//! caller: collide(&asteroid, &mut ship)
//!            |                 |
//!     Arg::shared        Arg::exclusive
//!            \                /
//!             [Arg; 2] ── reused by every ranked candidate
//! ```
//!
//! Narrowing only reborrows. A failed narrow leaves the adapter untouched for
//! the next candidate.

use core::fmt;

use crate::types::{Dispatch, View, ViewMut};

enum Slot<'a> {
    Shared(View<'a>),
    Exclusive(ViewMut<'a>),
    Inert,
}

/// Type-erased actual argument.
pub struct Arg<'a> {
    slot: Slot<'a>,
    type_name: &'static str,
}

impl<'a> Arg<'a> {
    /// Const-qualified argument: narrows to `&T` only.
    pub fn shared<T: Dispatch + ?Sized>(value: &'a T) -> Self {
        let view = value.view();
        Self {
            type_name: dynamic_name::<T>(view),
            slot: Slot::Shared(view),
        }
    }

    /// Non-const argument: narrows to `&T` or `&mut T`.
    pub fn exclusive<T: Dispatch + ?Sized>(value: &'a mut T) -> Self {
        let view = value.view_mut();
        let type_name = dynamic_name::<T>(view.as_view());
        Self {
            slot: Slot::Exclusive(view),
            type_name,
        }
    }

    /// Placeholder that never narrows to a real type.
    ///
    /// Only the fallback sentinel accepts it.
    pub fn inert() -> Self {
        Self {
            slot: Slot::Inert,
            type_name: "<inert>",
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self.slot, Slot::Shared(_))
    }

    pub fn is_inert(&self) -> bool {
        matches!(self.slot, Slot::Inert)
    }

    /// Dynamic type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn narrow_ref<T: Dispatch + ?Sized>(&self) -> Option<&T> {
        match &self.slot {
            Slot::Shared(view) => T::narrow(*view),
            Slot::Exclusive(view) => T::narrow(view.as_view()),
            Slot::Inert => None,
        }
    }

    /// Fails for shared arguments regardless of type.
    pub fn narrow_mut<T: Dispatch + ?Sized>(&mut self) -> Option<&mut T> {
        match &mut self.slot {
            Slot::Exclusive(view) => T::narrow_mut(view.reborrow()),
            Slot::Shared(_) | Slot::Inert => None,
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let access = match self.slot {
            Slot::Shared(_) => "shared",
            Slot::Exclusive(_) => "exclusive",
            Slot::Inert => "inert",
        };
        f.debug_struct("Arg")
            .field("type", &self.type_name)
            .field("access", &access)
            .finish()
    }
}

fn dynamic_name<T: Dispatch + ?Sized>(view: View<'_>) -> &'static str {
    match view {
        View::Object(object) => object.class_info().name(),
        View::Value(_) => T::describe().name(),
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts a caller's reference into an [`Arg`].
pub trait IntoArg<'a> {
    fn into_arg(self) -> Arg<'a>;
}

impl<'a, T: Dispatch + ?Sized> IntoArg<'a> for &'a T {
    fn into_arg(self) -> Arg<'a> {
        Arg::shared(self)
    }
}

impl<'a, T: Dispatch + ?Sized> IntoArg<'a> for &'a mut T {
    fn into_arg(self) -> Arg<'a> {
        Arg::exclusive(self)
    }
}

impl<'a> IntoArg<'a> for Arg<'a> {
    fn into_arg(self) -> Arg<'a> {
        self
    }
}

/// Converts a tuple of up to [`MAX_ARITY`](crate::MAX_ARITY) arguments into adapters.
pub trait IntoArgs<'a> {
    type Args: AsMut<[Arg<'a>]>;

    fn into_args(self) -> Self::Args;
}

impl<'a> IntoArgs<'a> for () {
    type Args = [Arg<'a>; 0];

    fn into_args(self) -> Self::Args {
        []
    }
}

macro_rules! impl_into_args {
    ($n:literal => $($A:ident $a:ident),+) => {
        impl<'a, $($A: IntoArg<'a>),+> IntoArgs<'a> for ($($A,)+) {
            type Args = [Arg<'a>; $n];

            fn into_args(self) -> Self::Args {
                let ($($a,)+) = self;
                [$($a.into_arg()),+]
            }
        }
    };
}

impl_into_args!(1 => A0 a0);
impl_into_args!(2 => A0 a0, A1 a1);
impl_into_args!(3 => A0 a0, A1 a1, A2 a2);
impl_into_args!(4 => A0 a0, A1 a1, A2 a2, A3 a3);
impl_into_args!(5 => A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_args!(6 => A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
