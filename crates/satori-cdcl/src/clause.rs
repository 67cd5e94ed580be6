//! Clause representation and watched-literal propagation.

use crate::state::{Cause, SearchState};
use satori_base::{BinaryDomain, Literal, SolveStatus, VarId};
use std::collections::BTreeSet;
use std::fmt;

/// Index of a clause in the solver's clause store.
pub type ClauseHandle = u32;

/// A disjunction of literals with two watched positions.
///
/// Only the two watched literals are re-examined when domains shrink; the
/// rest of the clause is scanned just when a watch has to move.
#[derive(Debug, Default)]
pub struct Clause {
    literals: Vec<Literal>,
    watched: [usize; 2],
}

impl Clause {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a literal. `positive` selects the polarity the clause needs
    /// the variable to take.
    pub fn add_literal(&mut self, var: VarId, positive: bool) {
        self.literals.push(Literal::new(var, positive));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// Removes duplicate literals.
    ///
    /// Returns `false` when the clause holds both polarities of a variable:
    /// such a clause is a tautology and must not register watches.
    fn remove_duplicate_literals(&mut self) -> bool {
        let mut encountered = BTreeSet::new();
        let mut kept = Vec::with_capacity(self.literals.len());
        for &lit in &self.literals {
            if encountered.contains(&lit.negated().to_dimacs()) {
                return false;
            }
            if encountered.insert(lit.to_dimacs()) {
                kept.push(lit);
            }
        }
        self.literals = kept;
        true
    }

    /// First propagation of a clause, right after it enters the store.
    ///
    /// Picks the two watched positions among the literals the current
    /// domains still permit. With fewer than two candidates the clause is
    /// already unit (propagate it now) or falsified.
    pub(crate) fn initial_propagate(&mut self, state: &mut SearchState, this: ClauseHandle) -> SolveStatus {
        if !self.remove_duplicate_literals() {
            return SolveStatus::Sat;
        }
        self.watched = [0, self.literals.len().saturating_sub(1)];
        let Some(first) = self.find_permitted(state, 0) else {
            tracing::debug!("clause {} is unsatisfiable on arrival: {}", this, self);
            return SolveStatus::Unsat;
        };
        self.watched[0] = first;
        let Some(second) = self.find_permitted(state, first + 1) else {
            return self.unit_propagate(state, this, first);
        };
        self.watched[1] = second;
        for watch in self.watched {
            let lit = self.literals[watch];
            state.watch_value_removal(this, lit.var(), lit.is_positive());
        }
        debug_assert!(self.watched[0] < self.watched[1] && self.watched[1] < self.literals.len());
        SolveStatus::Unknown
    }

    /// Propagation triggered because `triggering_var` lost the polarity one
    /// of the watched literals needs.
    ///
    /// Either moves the triggered watch to another non-falsified literal
    /// (returning `Unknown`, which tells the caller to sweep the stale watch
    /// entry) or unit-propagates the remaining watch.
    pub(crate) fn propagate(
        &mut self,
        state: &mut SearchState,
        this: ClauseHandle,
        triggering_var: VarId,
    ) -> SolveStatus {
        debug_assert!(self.watched[0] < self.watched[1] && self.watched[1] < self.literals.len());
        tracing::debug!("propagating clause {} {}", this, self);

        let triggered = usize::from(self.literals[self.watched[0]].var() != triggering_var);
        if let Some(next) = self.find_different_watch(state, triggered) {
            tracing::debug!("updating a watch of clause {} from {} to {}", this, self.watched[triggered], next);
            let lit = self.literals[next];
            state.watch_value_removal(this, lit.var(), lit.is_positive());
            self.watched[triggered] = next;
            if self.watched[0] > self.watched[1] {
                self.watched.swap(0, 1);
            }
            return SolveStatus::Unknown;
        }
        self.unit_propagate(state, this, self.watched[1 - triggered])
    }

    /// First literal at or after `from` whose polarity the variable's domain
    /// still contains.
    fn find_permitted(&self, state: &SearchState, from: usize) -> Option<usize> {
        (from..self.literals.len()).find(|&index| {
            let lit = self.literals[index];
            state.domain(lit.var()).contains(lit.is_positive())
        })
    }

    /// Cyclic search for a new home of the triggered watch: starts right
    /// after the triggered position, wraps around, skips the other watch.
    fn find_different_watch(&self, state: &SearchState, triggered: usize) -> Option<usize> {
        let watched = self.watched[triggered];
        let pivot = self.watched[1 - triggered];
        debug_assert_eq!(self.literal_state(state, watched), SolveStatus::Unsat);
        (watched + 1..self.literals.len())
            .chain(0..watched)
            .find(|&index| index != pivot && self.literal_state(state, index) != SolveStatus::Unsat)
    }

    fn literal_state(&self, state: &SearchState, index: usize) -> SolveStatus {
        let lit = self.literals[index];
        match state.domain(lit.var()).value() {
            None => SolveStatus::Unknown,
            Some(value) if value == lit.is_positive() => SolveStatus::Sat,
            Some(_) => SolveStatus::Unsat,
        }
    }

    /// The literal at `index` is the only candidate left: force it.
    fn unit_propagate(&self, state: &mut SearchState, this: ClauseHandle, index: usize) -> SolveStatus {
        let lit = self.literals[index];
        let domain = state.domain(lit.var());
        if !domain.contains(lit.is_positive()) {
            tracing::debug!("conflicting literal {}", lit);
            return SolveStatus::Unsat;
        }
        if domain.is_singleton() {
            tracing::debug!("clause {} already satisfied by literal {}", this, lit);
            return SolveStatus::Sat;
        }
        state.set_domain(lit.var(), BinaryDomain::singleton(lit.is_positive()), Cause::Clause(this));
        tracing::debug!("unit propagated literal {}", lit);
        SolveStatus::Sat
    }
}

impl fmt::Display for Clause {
    /// Renders as `{ 1, -2*, 3* }` with `*` marking the watched positions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, lit) in self.literals.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{lit}")?;
            if self.watched[0] == index || self.watched[1] == index {
                write!(f, "*")?;
            }
        }
        write!(f, "}}")
    }
}
