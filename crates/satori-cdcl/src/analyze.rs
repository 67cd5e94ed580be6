//! 1-UIP conflict analysis.

use crate::clause::Clause;
use crate::state::{Cause, SearchState};
use satori_base::{Error, Level, Result, VarId};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// The running resolvent of one conflict analysis.
///
/// `literals` maps every variable of the resolvent to its polarity;
/// `depth_to_var` orders the same variables by implication depth, so the
/// latest implied variable is the maximum entry. Variables with implication
/// depth 0 were fixed at level 0 and never enter the resolvent.
pub(crate) struct ConflictAnalysis {
    literals: BTreeMap<VarId, bool>,
    depth_to_var: BTreeMap<u32, VarId>,
}

impl ConflictAnalysis {
    /// Seeds the resolvent from the conflicting clause.
    pub fn new(state: &SearchState, conflicting: &Clause) -> Self {
        let mut literals = BTreeMap::new();
        let mut depth_to_var = BTreeMap::new();
        for lit in conflicting.literals() {
            let depth = state.implications[lit.var() as usize].depth;
            if depth == 0 {
                continue;
            }
            literals.insert(lit.var(), lit.is_positive());
            depth_to_var.insert(depth, lit.var());
        }
        Self { literals, depth_to_var }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The variable with the deepest implication in the resolvent.
    pub fn latest_var(&self) -> Option<VarId> {
        self.depth_to_var.iter().next_back().map(|(_, &var)| var)
    }

    /// Decision level of the `distance`-th latest variable in the resolvent.
    fn level_back(&self, state: &SearchState, distance: usize) -> Option<Level> {
        let (_, &var) = self.depth_to_var.iter().rev().nth(distance)?;
        Some(state.implications[var as usize].level)
    }

    /// A resolvent is "unit" once exactly one of its variables sits on the
    /// current conflict level: backjumping below that level turns the learned
    /// clause into an implication.
    pub fn is_unit(&self, state: &SearchState) -> bool {
        if self.depth_to_var.len() <= 1 {
            return true;
        }
        self.level_back(state, 0) != self.level_back(state, 1)
    }

    /// The level to backjump to: where the second-latest variable lives.
    pub fn backjump_level(&self, state: &SearchState) -> Result<Level> {
        self.level_back(state, 1)
            .ok_or_else(|| Error::Internal("backjump level requested for a resolvent of size < 2".into()))
    }

    /// Binary resolution of the resolvent with the clause that implied
    /// `pivot`.
    pub fn resolve(&mut self, state: &SearchState, clauses: &[Clause], pivot: VarId) -> Result<()> {
        let implication = state.implications[pivot as usize];
        let Cause::Clause(cause) = implication.cause else {
            return Err(Error::Internal(format!("conflict analysis pivoted on decision variable {pivot}")));
        };
        let reason = &clauses[cause as usize];
        tracing::debug!("resolving with clause {}={}", cause, reason);
        for lit in reason.literals() {
            let depth = state.implications[lit.var() as usize].depth;
            if depth == 0 {
                continue;
            }
            if lit.var() == pivot {
                match self.literals.remove(&pivot) {
                    Some(polarity) if polarity != lit.is_positive() => {
                        self.depth_to_var.remove(&depth);
                    }
                    _ => {
                        return Err(Error::Internal(format!(
                            "resolution pivot {pivot} does not oppose the resolvent"
                        )));
                    }
                }
            } else {
                match self.literals.entry(lit.var()) {
                    Entry::Vacant(entry) => {
                        entry.insert(lit.is_positive());
                        self.depth_to_var.insert(depth, lit.var());
                    }
                    Entry::Occupied(entry) => {
                        if *entry.get() != lit.is_positive() {
                            return Err(Error::Internal(format!(
                                "variable {} joins the resolvent with both polarities",
                                lit.var()
                            )));
                        }
                    }
                }
            }
        }
        tracing::debug!("cl={}", self.render(state));
        Ok(())
    }

    /// Variable/polarity pairs of the learned clause.
    pub fn literals(&self) -> impl Iterator<Item = (VarId, bool)> + '_ {
        self.literals.iter().map(|(&var, &positive)| (var, positive))
    }

    /// Renders as `{1@2, -3@4}`: signed literal at its decision level.
    pub fn render(&self, state: &SearchState) -> String {
        let mut out = String::from("{");
        for (index, (&var, &positive)) in self.literals.iter().enumerate() {
            if index != 0 {
                out.push_str(", ");
            }
            let level = state.implications[var as usize].level;
            let signed = if positive { var as i64 } else { -(var as i64) };
            let _ = write!(out, "{signed}@{level}");
        }
        out.push('}');
        out
    }
}
