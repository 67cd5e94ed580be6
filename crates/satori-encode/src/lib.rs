//! # satori-encode
//!
//! Finite-integer variables on top of the Boolean engine.
//!
//! Every integer variable over an ordered value set is encoded with one
//! "one-hot" Boolean variable per value (true iff the integer equals the
//! value) plus "order" variables (true iff the integer is at least the
//! value). Two reductions keep the encoding small and sound:
//!
//! - the minimum value needs no order variable, it is implicitly true;
//! - the maximum value's order variable coincides with its one-hot bit.
//!
//! The posted clauses are at-least-one over the one-hot bits, the at-most-one
//! coupling through the order bits, and the monotone chain over the order
//! bits.

use satori_base::{Error, Result, VarId};
use satori_cdcl::{CdclSolver, DecisionStrategy};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Handle of an encoded integer variable.
pub type IntVarHandle = usize;

#[derive(Debug, Clone, Copy)]
struct ValueVars {
    /// True iff the integer takes this value.
    one_hot: VarId,
    /// True iff the integer is at least this value. `None` for the domain
    /// minimum; aliases `one_hot` for the domain maximum.
    order: Option<VarId>,
}

/// Encodes integer variables into Boolean variables and clauses.
///
/// The encoder owns only the variable bookkeeping; the clauses live in the
/// solver the methods are handed.
#[derive(Debug, Default)]
pub struct IntToBoolVars {
    vars: Vec<BTreeMap<i64, ValueVars>>,
}

impl IntToBoolVars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Encodes one integer variable ranging over `values`.
    ///
    /// An empty value set posts the empty clause: the instance becomes
    /// unsatisfiable.
    pub fn add_var<S: DecisionStrategy>(
        &mut self,
        solver: &mut CdclSolver<S>,
        values: impl IntoIterator<Item = i64>,
    ) -> Result<IntVarHandle> {
        let values: BTreeSet<i64> = values.into_iter().collect();
        let mut table = BTreeMap::new();
        if let (Some(&min), Some(&max)) = (values.first(), values.last()) {
            for &value in &values {
                let one_hot = solver.add_var()?;
                let order = if value == max {
                    Some(one_hot)
                } else if value == min {
                    None
                } else {
                    Some(solver.add_var()?)
                };
                table.insert(value, ValueVars { one_hot, order });
            }
        }
        values_are_ordered(solver, &table)?;
        at_least_one_true(solver, &table)?;
        at_most_one_true(solver, &table)?;
        self.vars.push(table);
        Ok(self.vars.len() - 1)
    }

    /// The one-hot variables of one integer, in ascending value order.
    #[must_use]
    pub fn one_hot_vars(&self, var: IntVarHandle) -> Vec<VarId> {
        self.vars[var].values().map(|vars| vars.one_hot).collect()
    }

    /// All one-hot variables of every encoded integer.
    #[must_use]
    pub fn all_one_hot_vars(&self) -> Vec<VarId> {
        self.vars
            .iter()
            .flat_map(|table| table.values().map(|vars| vars.one_hot))
            .collect()
    }

    /// Decodes the integer's value out of a satisfying assignment.
    ///
    /// Exactly one one-hot bit must be true; anything else means the posted
    /// constraints were violated and is reported as an internal error.
    pub fn value<S: DecisionStrategy>(
        &self,
        solver: &CdclSolver<S>,
        var: IntVarHandle,
    ) -> Result<i64> {
        let mut found = None;
        for (&value, vars) in &self.vars[var] {
            if solver.value(vars.one_hot) {
                if found.is_some() {
                    return Err(Error::Internal(format!(
                        "integer variable {var} decoded to multiple values"
                    )));
                }
                found = Some(value);
            }
        }
        found.ok_or_else(|| Error::Internal(format!("integer variable {var} decoded to no value")))
    }
}

/// Monotone chain: an integer at least some value is at least every smaller
/// value.
fn values_are_ordered<S: DecisionStrategy>(
    solver: &mut CdclSolver<S>,
    table: &BTreeMap<i64, ValueVars>,
) -> Result<()> {
    let mut prev_order = None;
    for vars in table.values() {
        let Some(order) = vars.order else {
            continue;
        };
        if let Some(prev) = prev_order {
            add_implies(solver, order, prev)?;
        }
        prev_order = Some(order);
    }
    Ok(())
}

fn at_least_one_true<S: DecisionStrategy>(
    solver: &mut CdclSolver<S>,
    table: &BTreeMap<i64, ValueVars>,
) -> Result<()> {
    let clause = solver.add_clause()?;
    for vars in table.values() {
        clause.add_literal(vars.one_hot, true);
    }
    Ok(())
}

/// At-most-one through the order bits: taking a value implies being at least
/// that value, and rules out being at least the next one.
fn at_most_one_true<S: DecisionStrategy>(
    solver: &mut CdclSolver<S>,
    table: &BTreeMap<i64, ValueVars>,
) -> Result<()> {
    let mut prev_one_hot = None;
    for vars in table.values() {
        if let Some(order) = vars.order {
            add_implies(solver, vars.one_hot, order)?;
            if let Some(prev) = prev_one_hot {
                add_implies_not(solver, prev, order)?;
            }
        }
        prev_one_hot = Some(vars.one_hot);
    }
    Ok(())
}

fn add_implies<S: DecisionStrategy>(
    solver: &mut CdclSolver<S>,
    pre: VarId,
    post: VarId,
) -> Result<()> {
    if pre == post {
        return Ok(());
    }
    let clause = solver.add_clause()?;
    clause.add_literal(pre, false);
    clause.add_literal(post, true);
    Ok(())
}

fn add_implies_not<S: DecisionStrategy>(
    solver: &mut CdclSolver<S>,
    pre: VarId,
    post: VarId,
) -> Result<()> {
    let clause = solver.add_clause()?;
    clause.add_literal(pre, false);
    clause.add_literal(post, false);
    Ok(())
}
