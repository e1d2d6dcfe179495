//! Per-arity implementations of [`Implementation`] for plain closures and fns.
//!
//! Arity is a closed set (0 through [`MAX_ARITY`](crate::MAX_ARITY)); each
//! shape is one macro expansion below.

use super::param::{Param, ParamItem};
use super::{IntoOutcome, Outcome};
use crate::arg::Arg;
use crate::types::Signature;

/// A callable usable as a method body.
///
/// `Marker` is `fn(P0, .., Pn) -> O` and only exists to keep the per-arity
/// impls apart; callers never name it.
pub trait Implementation<R, Marker>: Send + Sync + 'static {
    fn signature() -> Signature;

    /// Narrow `args` left to right and call the body if all succeed.
    fn invoke(&self, args: &mut [Arg<'_>]) -> Outcome<R>;
}

macro_rules! impl_implementation {
    ($($P:ident $p:ident),*) => {
        impl<R, F, O, $($P: Param),*> Implementation<R, fn($($P,)*) -> O> for F
        where
            F: Send + Sync + 'static,
            for<'f> &'f F: Fn($($P),*) -> O + Fn($(ParamItem<'_, $P>),*) -> O,
            O: IntoOutcome<R>,
        {
            fn signature() -> Signature {
                Signature::new(alloc::vec![$(<$P as Param>::describe()),*])
            }

            fn invoke(&self, args: &mut [Arg<'_>]) -> Outcome<R> {
                // Picks the item-typed `Fn` impl for the call.
                #[allow(clippy::too_many_arguments)]
                fn call_inner<O, $($P),*>(f: impl Fn($($P),*) -> O, $($p: $P),*) -> O {
                    f($($p),*)
                }

                let [$($p),*] = args else {
                    return Outcome::NoMatch;
                };
                $(
                    let Some($p) = <$P as Param>::narrow($p) else {
                        return Outcome::NoMatch;
                    };
                )*
                IntoOutcome::<R>::into_outcome(call_inner(self, $($p),*))
            }
        }
    };
}

impl_implementation!();
impl_implementation!(P0 p0);
impl_implementation!(P0 p0, P1 p1);
impl_implementation!(P0 p0, P1 p1, P2 p2);
impl_implementation!(P0 p0, P1 p1, P2 p2, P3 p3);
impl_implementation!(P0 p0, P1 p1, P2 p2, P3 p3, P4 p4);
impl_implementation!(P0 p0, P1 p1, P2 p2, P3 p3, P4 p4, P5 p5);
