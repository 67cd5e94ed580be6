//! Core value types shared by every Satori solver.

mod domain;
mod literal;

pub use domain::BinaryDomain;
pub use literal::Literal;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense handle of a solver variable.
///
/// Handles start at 1; handle 0 is a dead sentinel so that signed-literal
/// encodings (positive = true, negative = false) stay unambiguous.
pub type VarId = u32;

/// Decision level: the number of live decisions on the decision stack.
pub type Level = u32;

/// Largest variable handle any solver accepts.
///
/// Capped at the positive signed 32-bit range so every handle has a signed
/// DIMACS rendering.
pub const MAX_VAR: VarId = i32::MAX as VarId;

/// The outcome of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A satisfying assignment was found.
    Sat,
    /// No satisfying assignment exists.
    Unsat,
    /// The search budget ran out before a verdict was reached.
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sat => "SAT",
            Self::Unsat => "UNSAT",
            Self::Unknown => "UNKNOWN",
        })
    }
}
