//! Dispatch Loop
//!
//! A [`Multimethod`] owns its ranked implementations and an optional fallback.
//! Each call walks the ranked list once:
//!
//! ```text
//! TRYING(0) ──NoMatch/Skip──> TRYING(1) ──> ... ──> FALLBACK_CHECK
//!     |                                                  |
//!  Matched ──> Ok(r)                    fallback matched ──> Ok(r)
//!  Raised  ──> Err(e)                   otherwise        ──> Err(NotImplemented)
//! ```

mod builder;
#[cfg(feature = "std")]
mod lazy;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::arg::{Arg, IntoArgs};
use crate::error::NotImplemented;
use crate::method::{Method, Outcome};
use crate::types::{Signature, TypeDesc};

pub use builder::Builder;
#[cfg(feature = "std")]
pub use lazy::LazyMultimethod;

/// A built, immutable multimethod.
pub struct Multimethod<R> {
    name: &'static str,
    bases: Option<Vec<TypeDesc>>,
    ranked: Vec<Box<dyn Method<R>>>,
    fallback: Option<Box<dyn Method<R>>>,
}

impl<R: 'static> Multimethod<R> {
    pub fn builder(name: &'static str) -> Builder<R> {
        Builder::new(name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared dispatch ancestors, `None` for an open multimethod.
    pub fn bases(&self) -> Option<&[TypeDesc]> {
        self.bases.as_deref()
    }

    /// Number of ranked implementations (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Signatures in the order they are tried.
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> + '_ {
        self.ranked.iter().map(|method| method.signature())
    }

    /// Call with a tuple of references: `&T` is const, `&mut T` is not.
    pub fn call<'a>(&self, args: impl IntoArgs<'a>) -> Result<R, NotImplemented> {
        let mut args = args.into_args();
        self.dispatch(args.as_mut())
    }

    /// Run the dispatch loop over prepared adapters.
    pub fn dispatch(&self, args: &mut [Arg<'_>]) -> Result<R, NotImplemented> {
        for (rank, method) in self.ranked.iter().enumerate() {
            match method.try_call(args) {
                Outcome::Matched(value) => return Ok(value),
                Outcome::Raised(error) => return Err(error),
                Outcome::NoMatch => {
                    tracing::trace!(multimethod = self.name, rank, "no match");
                }
                Outcome::Skip => {
                    tracing::trace!(
                        multimethod = self.name,
                        rank,
                        signature = %method.signature(),
                        "implementation skipped"
                    );
                }
            }
        }

        if let Some(fallback) = &self.fallback {
            tracing::debug!(multimethod = self.name, "ranked implementations exhausted, trying fallback");
            match fallback.try_call(&mut [Arg::inert()]) {
                Outcome::Matched(value) => return Ok(value),
                Outcome::Raised(error) => return Err(error),
                Outcome::NoMatch | Outcome::Skip => {}
            }
        }

        let error = NotImplemented::new(self.name, args);
        tracing::debug!(%error, "no implementation matched");
        Err(error)
    }
}

impl<R> fmt::Debug for Multimethod<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranked: Vec<String> = self.ranked.iter().map(|m| m.signature().to_string()).collect();
        f.debug_struct("Multimethod")
            .field("name", &self.name)
            .field("ranked", &ranked)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
