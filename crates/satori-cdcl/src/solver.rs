//! The CDCL driver: propagation fix-point, decisions, conflict handling and
//! backjumping.

use crate::analyze::ConflictAnalysis;
use crate::clause::{Clause, ClauseHandle};
use crate::state::{Cause, Implication, SearchState};
use crate::strategy::{CircularScan, DecisionStrategy};
use satori_base::{BinaryDomain, Error, Level, Result, SolveStatus, VarId, MAX_VAR};

/// Default bound on executed backjumps.
const DEFAULT_MAX_BACKTRACKS: u64 = 1 << 32;

/// A Conflict-Driven Clause-Learning SAT solver.
///
/// Variables and clauses are registered up front; `solve` then runs
/// propagation, decisions, conflict analysis and backjumping to a verdict,
/// bounded by the backtrack budget. After an `Unknown` verdict the instance
/// is spent and must be rebuilt for further solving.
pub struct CdclSolver<S: DecisionStrategy = CircularScan> {
    max_backtracks: u64,
    state: SearchState,
    clauses: Vec<Clause>,
    strategy: S,
}

impl CdclSolver<CircularScan> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(CircularScan)
    }

    /// A solver whose search gives up after `max_backtracks` backjumps.
    #[must_use]
    pub fn with_max_backtracks(max_backtracks: u64) -> Self {
        let mut solver = Self::new();
        solver.max_backtracks = max_backtracks;
        solver
    }
}

impl Default for CdclSolver<CircularScan> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DecisionStrategy> CdclSolver<S> {
    /// A solver with an injected decision strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            state: SearchState::new(),
            clauses: Vec::new(),
            strategy,
        }
    }

    pub fn set_max_backtracks(&mut self, max_backtracks: u64) {
        self.max_backtracks = max_backtracks;
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.state.num_vars()
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Appends a fresh variable with a universal domain.
    pub fn add_var(&mut self) -> Result<VarId> {
        self.add_var_with_domain(BinaryDomain::universal())
    }

    /// Appends a fresh variable with a pre-restricted domain.
    pub fn add_var_with_domain(&mut self, domain: BinaryDomain) -> Result<VarId> {
        if self.state.domains.len() > MAX_VAR as usize {
            return Err(Error::IndexOverflow("variable"));
        }
        self.state.domains.push(domain);
        Ok((self.state.domains.len() - 1) as VarId)
    }

    /// Appends an empty clause and returns it for literal registration.
    pub fn add_clause(&mut self) -> Result<&mut Clause> {
        if self.clauses.len() >= ClauseHandle::MAX as usize {
            return Err(Error::IndexOverflow("clause"));
        }
        let handle = self.clauses.len();
        self.clauses.push(Clause::new());
        Ok(&mut self.clauses[handle])
    }

    /// The assigned value of a variable. Meaningful only after a `Sat`
    /// verdict, when every domain is a singleton.
    #[must_use]
    pub fn value(&self, var: VarId) -> bool {
        self.state.domain(var).min()
    }

    #[must_use]
    pub fn current_domain(&self, var: VarId) -> BinaryDomain {
        self.state.domain(var)
    }

    /// Decides satisfiability of the registered clauses.
    ///
    /// Rejects clauses referencing unknown variables before any search work,
    /// then searches until a verdict or until the backtrack budget runs out
    /// (`Unknown`).
    pub fn solve(&mut self) -> Result<SolveStatus> {
        self.validate_clauses()?;
        self.state.inside_solve = true;
        let status = self.run();
        self.state.inside_solve = false;
        status
    }

    fn run(&mut self) -> Result<SolveStatus> {
        if !self.initial_propagate() {
            return Ok(SolveStatus::Unsat);
        }
        let mut backtracks: u64 = 0;
        loop {
            if let Some(conflicting) = self.propagate() {
                if self.state.level() == 0 {
                    tracing::debug!("failed at level 0, no solution possible");
                    return Ok(SolveStatus::Unsat);
                }
                let Some((level, learned)) = self.analyze_conflict(conflicting)? else {
                    tracing::debug!("conflict analysis derived the empty clause, no solution possible");
                    return Ok(SolveStatus::Unsat);
                };
                if backtracks == self.max_backtracks {
                    return Ok(SolveStatus::Unknown);
                }
                self.backtrack(level);
                let status = self.clauses[learned as usize].initial_propagate(&mut self.state, learned);
                if status != SolveStatus::Sat {
                    return Err(Error::Internal(format!(
                        "learned clause {learned} failed to unit-propagate after the backjump"
                    )));
                }
                backtracks += 1;
            } else if !self.make_choice() {
                self.validate_all_singletons()?;
                if tracing::enabled!(tracing::Level::DEBUG) {
                    let solution: Vec<String> = (1..=self.num_vars() as VarId)
                        .map(|var| format!("v{}={}", var, u8::from(self.value(var))))
                        .collect();
                    tracing::debug!("solution: {}", solution.join(", "));
                }
                return Ok(SolveStatus::Sat);
            }
        }
    }

    /// Registers watches for every clause and propagates the initial units.
    /// Returns `false` when the instance is already unsatisfiable.
    fn initial_propagate(&mut self) -> bool {
        self.state.dirty.clear();
        self.state.trail.clear();
        self.state.implications.clear();
        self.state.implications.resize(self.state.domains.len(), Implication::default());
        self.state.watches.reset(self.state.domains.len());
        for handle in 0..self.clauses.len() {
            let status = self.clauses[handle].initial_propagate(&mut self.state, handle as ClauseHandle);
            if status == SolveStatus::Unsat {
                return false;
            }
        }
        self.propagate().is_none()
    }

    /// Drains the dirty queue to fix-point.
    ///
    /// Every popped variable is a singleton; the clauses watching the removed
    /// polarity are revisited. A clause that moved its watch is swept out of
    /// the list; a falsified clause aborts the pass and is reported.
    fn propagate(&mut self) -> Option<ClauseHandle> {
        while let Some(var) = self.state.dirty.pop_front() {
            debug_assert!(self.state.domain(var).is_singleton());
            let removed = !self.state.domain(var).contains(true);
            let mut pending = self.state.watches.take(removed, var);
            let mut index = 0;
            while index < pending.len() {
                let handle = pending[index];
                match self.clauses[handle as usize].propagate(&mut self.state, handle, var) {
                    SolveStatus::Unknown => {
                        pending.swap_remove(index);
                    }
                    SolveStatus::Unsat => {
                        self.state.watches.restore(removed, var, pending);
                        return Some(handle);
                    }
                    SolveStatus::Sat => index += 1,
                }
            }
            self.state.watches.restore(removed, var, pending);
        }
        None
    }

    /// Derives a learned clause from the conflict by 1-UIP resolution.
    ///
    /// Returns `None` when the resolution chain reaches the empty clause,
    /// i.e. the instance is unsatisfiable.
    fn analyze_conflict(&mut self, conflicting: ClauseHandle) -> Result<Option<(Level, ClauseHandle)>> {
        tracing::debug!(
            "initiating conflict analysis with conflicting clause {}={}",
            conflicting,
            self.clauses[conflicting as usize]
        );
        let mut algo = ConflictAnalysis::new(&self.state, &self.clauses[conflicting as usize]);
        tracing::debug!("cl={}", algo.render(&self.state));
        loop {
            let Some(pivot) = algo.latest_var() else {
                return Ok(None);
            };
            algo.resolve(&self.state, &self.clauses, pivot)?;
            if algo.is_empty() {
                return Ok(None);
            }
            if algo.len() == 1 {
                let learned = self.create_learned_clause(&algo)?;
                return Ok(Some((0, learned)));
            }
            if algo.is_unit(&self.state) {
                let level = algo.backjump_level(&self.state)?;
                let learned = self.create_learned_clause(&algo)?;
                return Ok(Some((level, learned)));
            }
        }
    }

    fn create_learned_clause(&mut self, algo: &ConflictAnalysis) -> Result<ClauseHandle> {
        let handle = self.clauses.len() as ClauseHandle;
        let clause = self.add_clause()?;
        for (var, positive) in algo.literals() {
            clause.add_literal(var, positive);
        }
        tracing::debug!("learned clause {}={}", handle, self.clauses[handle as usize]);
        Ok(handle)
    }

    /// Rewinds the trail and the decision stack to `target`.
    ///
    /// Popped variables return to the universal domain with a neutral
    /// implication record; the dirty queue is dropped wholesale.
    fn backtrack(&mut self, target: Level) {
        debug_assert!(self.state.level() > 0);
        tracing::debug!("backtracking to level {}", target);
        while let Some(&var) = self.state.trail.last() {
            if self.state.implications[var as usize].level <= target {
                break;
            }
            tracing::trace!("resetting var{}", var);
            self.state.trail.pop();
            self.state.domains[var as usize] = BinaryDomain::universal();
            self.state.implications[var as usize] = Implication::default();
        }
        self.state.decisions.truncate(target as usize);
        self.state.dirty.clear();
    }

    /// Assigns the next free variable, or reports that none is left.
    fn make_choice(&mut self) -> bool {
        let prev = self.state.decisions.last().copied();
        let start = self.strategy.first_var_to_choose(prev);
        let Some(chosen) = self.find_free_var(start) else {
            tracing::debug!("nothing left to choose");
            return false;
        };
        let value = self.strategy.choose_value(self.state.domain(chosen));
        self.state.decisions.push(chosen);
        self.state.set_domain(chosen, BinaryDomain::singleton(value), Cause::Decision);
        true
    }

    /// Circular scan for a non-singleton variable, beginning at `start`.
    fn find_free_var(&self, start: VarId) -> Option<VarId> {
        let end = self.state.domains.len() as VarId;
        let start = if start == 0 || start >= end { 1 } else { start };
        (start..end)
            .chain(1..start)
            .find(|&var| !self.state.domain(var).is_singleton())
    }

    fn validate_clauses(&self) -> Result<()> {
        let num_vars = self.num_vars();
        for clause in &self.clauses {
            for lit in clause.literals() {
                if lit.var() == 0 || lit.var() as usize > num_vars {
                    return Err(Error::OutOfRange { var: lit.var(), num_vars });
                }
            }
        }
        Ok(())
    }

    fn validate_all_singletons(&self) -> Result<()> {
        for (var, domain) in self.state.domains.iter().enumerate().skip(1) {
            if !domain.is_singleton() {
                return Err(Error::Internal(format!("var{var} should be a singleton in a SAT solution")));
            }
        }
        Ok(())
    }
}
