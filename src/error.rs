//! Error types.
//!
//! [`NotImplemented`] is the only error a caller of a multimethod handles.
//! [`DefinitionError`] is raised once, when a multimethod is built.

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::arg::Arg;

/// No ranked implementation matched and no fallback accepted the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: not implemented for ({})", .name, .arguments.join(", "))]
pub struct NotImplemented {
    /// Name of the multimethod.
    pub name: &'static str,
    /// Dynamic type names of the actual arguments.
    pub arguments: Vec<&'static str>,
}

impl NotImplemented {
    pub fn new(name: &'static str, args: &[Arg<'_>]) -> Self {
        Self {
            name,
            arguments: args.iter().map(Arg::type_name).collect(),
        }
    }
}

/// A multimethod definition that can never be called correctly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("{name}: no implementations registered")]
    Empty { name: &'static str },

    #[error("{name}: {positions} dispatch positions declared, at most {} supported", crate::MAX_ARITY)]
    TooManyPositions { name: &'static str, positions: usize },

    #[error("{name}: implementation {signature} takes {found} parameters, declared {expected}")]
    ArityMismatch {
        name: &'static str,
        signature: String,
        expected: usize,
        found: usize,
    },

    #[error("{name}: parameter {position} of {signature} is {parameter}, which does not derive from {base}")]
    IncompatibleParameter {
        name: &'static str,
        signature: String,
        position: usize,
        parameter: &'static str,
        base: &'static str,
    },

    #[error("{name}: more than one fallback registered")]
    DuplicateFallback { name: &'static str },

    #[error("{name}: fallback marker in {signature} must be the only parameter")]
    MisplacedFallback { name: &'static str, signature: String },
}

impl DefinitionError {
    /// Name of the multimethod being defined.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty { name }
            | Self::TooManyPositions { name, .. }
            | Self::ArityMismatch { name, .. }
            | Self::IncompatibleParameter { name, .. }
            | Self::DuplicateFallback { name }
            | Self::MisplacedFallback { name, .. } => *name,
        }
    }
}
