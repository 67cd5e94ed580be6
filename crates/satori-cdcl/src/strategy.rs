//! Pluggable decision strategy.

use satori_base::{BinaryDomain, VarId};

/// Chooses where the next decision happens and which value it assigns.
///
/// The driver scans circularly for a non-singleton variable starting at
/// [`DecisionStrategy::first_var_to_choose`]; once one is found,
/// [`DecisionStrategy::choose_value`] picks the value to assign. Neither
/// choice affects correctness, only the shape of the search tree and of the
/// witness.
pub trait DecisionStrategy {
    /// The value assigned to the chosen variable.
    fn choose_value(&mut self, domain: BinaryDomain) -> bool {
        domain.min()
    }

    /// The variable at which the free-variable scan starts. `prev` is the
    /// most recent decision variable still on the trail.
    fn first_var_to_choose(&mut self, prev: Option<VarId>) -> VarId {
        prev.unwrap_or(1)
    }
}

/// Default policy: resume the scan at the previous decision variable and
/// assign `false` first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularScan;

impl DecisionStrategy for CircularScan {}
