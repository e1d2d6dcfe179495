//! Method Records
//!
//! A method record pairs one user callable with its declared [`Signature`].
//! Calling it returns an explicit [`Outcome`] instead of unwinding:
//!
//! | Outcome | Meaning | Dispatch loop |
//! |---------|---------|---------------|
//! | `Matched(r)` | every argument narrowed, body returned `r` | return `Ok(r)` |
//! | `NoMatch` | some argument failed to narrow | try next candidate |
//! | `Skip` | body asked for the next candidate | try next candidate |
//! | `Raised(e)` | body propagated a nested dispatch failure | return `Err(e)` |

mod arity;
mod param;

use core::marker::PhantomData;

use crate::arg::Arg;
use crate::error::NotImplemented;
use crate::types::Signature;

pub use arity::Implementation;
pub use param::{Fallback, Param, ParamItem};

// =============================================================================
// Outcome
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    Matched(R),
    NoMatch,
    Skip,
    Raised(NotImplemented),
}

/// Voluntary skip signal: "treat me as unmatched".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Skip;

/// Defer to the next ranked implementation.
///
/// ```ignore
/// .method(|car: &Car, _: &Inspector| -> Result<(), Skip> {
///     log("seat belts");
///     next_method()
/// })
/// ```
pub fn next_method<R>() -> Result<R, Skip> {
    Err(Skip)
}

/// Return types an implementation body may use.
pub trait IntoOutcome<R> {
    fn into_outcome(self) -> Outcome<R>;
}

impl<R> IntoOutcome<R> for R {
    fn into_outcome(self) -> Outcome<R> {
        Outcome::Matched(self)
    }
}

impl<R> IntoOutcome<R> for Result<R, Skip> {
    fn into_outcome(self) -> Outcome<R> {
        match self {
            Ok(value) => Outcome::Matched(value),
            Err(Skip) => Outcome::Skip,
        }
    }
}

impl<R> IntoOutcome<R> for Result<R, NotImplemented> {
    fn into_outcome(self) -> Outcome<R> {
        match self {
            Ok(value) => Outcome::Matched(value),
            Err(error) => Outcome::Raised(error),
        }
    }
}

impl<R> IntoOutcome<R> for Outcome<R> {
    fn into_outcome(self) -> Outcome<R> {
        self
    }
}

// =============================================================================
// Method / Record
// =============================================================================

/// Object-safe view of a registered implementation.
pub trait Method<R>: Send + Sync {
    fn signature(&self) -> &Signature;

    /// Registration order, used as the final tie-break.
    fn index(&self) -> usize;

    fn is_fallback(&self) -> bool {
        self.signature().is_fallback()
    }

    fn try_call(&self, args: &mut [Arg<'_>]) -> Outcome<R>;
}

/// A callable plus its signature. `M` is the marker selecting the
/// [`Implementation`] impl (`fn(P0, P1, ..) -> O`).
pub struct Record<F, M> {
    func: F,
    signature: Signature,
    index: usize,
    marker: PhantomData<fn() -> M>,
}

impl<F, M> Record<F, M> {
    pub fn new<R>(func: F, index: usize) -> Self
    where
        F: Implementation<R, M>,
    {
        Self {
            func,
            signature: <F as Implementation<R, M>>::signature(),
            index,
            marker: PhantomData,
        }
    }
}

impl<R, F, M> Method<R> for Record<F, M>
where
    F: Implementation<R, M>,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn index(&self) -> usize {
        self.index
    }

    fn try_call(&self, args: &mut [Arg<'_>]) -> Outcome<R> {
        self.func.invoke(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Access, Kind};

    fn record<R, M, F: Implementation<R, M>>(func: F) -> Record<F, M> {
        Record::new::<R>(func, 0)
    }

    #[test]
    fn test_signature_from_closure() {
        let rec = record::<u8, _, _>(|_: &i32, _: &mut String| 1_u8);
        let params = rec.signature.params();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].access, Access::Shared);
        assert_eq!(params[1].access, Access::Exclusive);
        assert_eq!(params[1].ty.kind(), Kind::Value);
    }

    #[test]
    fn test_match_and_no_match() {
        let rec = record::<i32, _, _>(|a: &i32, b: &i32| a + b);

        let (x, y) = (2, 3);
        let mut args = [Arg::shared(&x), Arg::shared(&y)];
        assert_eq!(Method::<i32>::try_call(&rec, &mut args), Outcome::Matched(5));

        let z = 1.5_f32;
        let mut args = [Arg::shared(&x), Arg::shared(&z)];
        assert_eq!(Method::<i32>::try_call(&rec, &mut args), Outcome::NoMatch);
    }

    #[test]
    fn test_arity_mismatch_is_no_match() {
        let rec = record::<bool, _, _>(|_: &i32| true);
        let (x, y) = (1, 2);
        let mut args = [Arg::shared(&x), Arg::shared(&y)];
        assert_eq!(Method::<bool>::try_call(&rec, &mut args), Outcome::NoMatch);
    }

    #[test]
    fn test_skip_and_raise() {
        let skip = record::<i32, _, _>(|_: &i32| next_method::<i32>());
        let raise = record::<i32, _, _>(|_: &i32| -> Result<i32, NotImplemented> {
            Err(NotImplemented::new("inner", &[]))
        });

        let x = 0;
        assert_eq!(Method::<i32>::try_call(&skip, &mut [Arg::shared(&x)]), Outcome::Skip);
        assert!(matches!(
            Method::<i32>::try_call(&raise, &mut [Arg::shared(&x)]),
            Outcome::Raised(NotImplemented { name: "inner", .. })
        ));
    }

    #[test]
    fn test_const_argument_rejects_exclusive_parameter() {
        let rec = record::<(), _, _>(|n: &mut i32| *n += 1);
        let n = 1;
        assert_eq!(Method::<()>::try_call(&rec, &mut [Arg::shared(&n)]), Outcome::NoMatch);

        let mut n = 1;
        assert_eq!(Method::<()>::try_call(&rec, &mut [Arg::exclusive(&mut n)]), Outcome::Matched(()));
        assert_eq!(n, 2);
    }

    #[test]
    fn test_fallback_record() {
        let rec = record::<&str, _, _>(|_: Fallback| "fallback");
        assert!(Method::<&str>::is_fallback(&rec));
        assert_eq!(Method::<&str>::try_call(&rec, &mut [Arg::inert()]), Outcome::Matched("fallback"));
    }
}
