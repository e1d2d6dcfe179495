use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::MAX_ARITY;
use crate::error::DefinitionError;
use crate::method::{Fallback, Implementation, IntoOutcome, Method, Record};
use crate::rank::rank;
use crate::types::{Dispatch, Signature, TypeDesc};

use super::Multimethod;

/// Collects the implementations of one multimethod.
///
/// ```ignore
/// let collide = Multimethod::builder("collide")
///     .base::<dyn Object>()
///     .base::<dyn Object>()
///     .method(|_: &Asteroid, _: &Asteroid| "traverse")
///     .method(|_: &Asteroid, _: &Spaceship| "boom")
///     .fallback(|| "miss")
///     .build()?;
/// ```
///
/// Registration order is irrelevant except as the last tie-break.
pub struct Builder<R> {
    name: &'static str,
    bases: Option<Vec<TypeDesc>>,
    methods: Vec<Box<dyn Method<R>>>,
}

impl<R: 'static> Builder<R> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bases: None,
            methods: Vec::new(),
        }
    }

    /// Declare the dispatch ancestor of the next position.
    ///
    /// Once any base is declared, every implementation must take exactly one
    /// parameter per declared base.
    pub fn base<B: Dispatch + ?Sized>(mut self) -> Self {
        self.bases.get_or_insert_with(Vec::new).push(B::describe());
        self
    }

    /// Register an implementation.
    ///
    /// Closure parameters must be annotated (`|a: &Asteroid, b: &mut Ship| ..`).
    pub fn method<M: 'static, F: Implementation<R, M>>(mut self, func: F) -> Self {
        let index = self.methods.len();
        self.methods.push(Box::new(Record::new::<R>(func, index)));
        self
    }

    /// Register the handler used when nothing else matches.
    pub fn fallback<F, O>(self, func: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
        O: IntoOutcome<R> + 'static,
    {
        self.method(move |_: Fallback| func())
    }

    /// Validate, rank, and freeze.
    pub fn build(self) -> Result<Multimethod<R>, DefinitionError> {
        let Builder { name, bases, methods } = self;

        if methods.is_empty() {
            return Err(DefinitionError::Empty { name });
        }
        if let Some(bases) = &bases {
            if bases.len() > MAX_ARITY {
                return Err(DefinitionError::TooManyPositions {
                    name,
                    positions: bases.len(),
                });
            }
        }

        let mut fallback = None;
        let mut candidates = Vec::with_capacity(methods.len());
        for method in methods {
            validate(name, bases.as_deref(), method.signature())?;
            if !method.is_fallback() {
                candidates.push(method);
            } else if fallback.is_none() {
                fallback = Some(method);
            } else {
                return Err(DefinitionError::DuplicateFallback { name });
            }
        }

        let order = {
            let signatures: Vec<&Signature> = candidates.iter().map(|m| m.signature()).collect();
            rank(&signatures)
        };
        let mut slots: Vec<Option<Box<dyn Method<R>>>> = candidates.into_iter().map(Some).collect();
        let ranked: Vec<Box<dyn Method<R>>> = order.into_iter().filter_map(|i| slots[i].take()).collect();

        for (rank, method) in ranked.iter().enumerate() {
            tracing::debug!(
                multimethod = name,
                rank,
                registered = method.index(),
                signature = %method.signature(),
                "ranked implementation"
            );
        }

        Ok(Multimethod {
            name,
            bases,
            ranked,
            fallback,
        })
    }
}

fn validate(
    name: &'static str,
    bases: Option<&[TypeDesc]>,
    signature: &Signature,
) -> Result<(), DefinitionError> {
    if signature.has_sentinel() && !signature.is_fallback() {
        return Err(DefinitionError::MisplacedFallback {
            name,
            signature: signature.to_string(),
        });
    }
    let Some(bases) = bases else {
        return Ok(());
    };
    if signature.is_fallback() {
        return Ok(());
    }
    if signature.len() != bases.len() {
        return Err(DefinitionError::ArityMismatch {
            name,
            signature: signature.to_string(),
            expected: bases.len(),
            found: signature.len(),
        });
    }
    for (position, (param, base)) in signature.params().iter().zip(bases).enumerate() {
        if !param.ty.accepts(base) {
            return Err(DefinitionError::IncompatibleParameter {
                name,
                signature: signature.to_string(),
                position,
                parameter: param.ty.name(),
                base: base.name(),
            });
        }
    }
    Ok(())
}
