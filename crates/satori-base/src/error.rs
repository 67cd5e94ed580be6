//! Unified error types for Satori.

use crate::types::VarId;
use thiserror::Error;

/// The main error type for Satori operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed problem text from an input provider.
    #[error("invalid input format: {0}")]
    InvalidInput(String),

    /// A clause references a variable handle the solver never created.
    #[error("variable {var} is out of range, the solver holds {num_vars} variables")]
    OutOfRange { var: VarId, num_vars: usize },

    /// The handle space for the named entity is exhausted.
    #[error("too many {0}s to address")]
    IndexOverflow(&'static str),

    /// A solver self-check failed. This is a bug in the solver, not a
    /// property of the problem instance.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
