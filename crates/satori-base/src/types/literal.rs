//! Signed variable references.

use super::VarId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// A variable paired with a polarity.
///
/// Renders as a signed integer whose magnitude is the variable handle and
/// whose sign is the polarity. Handle 0 stays reserved so the rendering is
/// never ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    var: VarId,
    positive: bool,
}

impl Literal {
    #[must_use]
    pub const fn new(var: VarId, positive: bool) -> Self {
        Self { var, positive }
    }

    #[must_use]
    pub const fn var(&self) -> VarId {
        self.var
    }

    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.positive
    }

    /// The same variable with the opposite polarity.
    #[must_use]
    pub const fn negated(&self) -> Self {
        Self { var: self.var, positive: !self.positive }
    }

    /// Signed DIMACS rendering: `var` for positive, `-var` for negative.
    #[must_use]
    pub const fn to_dimacs(&self) -> i32 {
        if self.positive {
            self.var as i32
        } else {
            -(self.var as i32)
        }
    }

    /// Parses the signed DIMACS rendering. `lit` must be non-zero.
    #[must_use]
    pub const fn from_dimacs(lit: i32) -> Self {
        Self { var: lit.unsigned_abs(), positive: lit > 0 }
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}
