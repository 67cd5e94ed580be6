//! Mutable search state: domains, trail, implication records, watch index
//! and the dirty-variable queue.

use crate::clause::ClauseHandle;
use crate::watch::WatchIndex;
use satori_base::{BinaryDomain, Level, VarId};
use std::collections::VecDeque;

/// What caused a variable to become a singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Cause {
    /// The driver made a search decision.
    #[default]
    Decision,
    /// The clause unit-propagated.
    Clause(ClauseHandle),
}

/// Historic record of a single implication.
///
/// An implication is the act of propagating a single clause that ends with
/// the reduction of a single variable's domain to a singleton.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Implication {
    pub cause: Cause,
    /// 1-based position on the trail; 0 for variables assigned outside of
    /// `solve()`, which never take part in conflict analysis.
    pub depth: u32,
    /// The decision level at the moment the variable was assigned.
    pub level: Level,
}

/// The engine-owned state that clause propagation reads and writes.
///
/// Clauses receive this by `&mut` for the duration of one propagation call,
/// together with their own handle; they never hold on to the reference.
#[derive(Debug)]
pub(crate) struct SearchState {
    /// Domains indexed by variable handle. Slot 0 is a dead sentinel so that
    /// handles line up with signed-literal magnitudes.
    pub domains: Vec<BinaryDomain>,
    /// One record per variable handle, neutral unless the variable is on the
    /// trail.
    pub implications: Vec<Implication>,
    pub watches: WatchIndex,
    /// Assigned variables whose dependent clauses still await revisiting.
    pub dirty: VecDeque<VarId>,
    /// Variables in the order they became singletons.
    pub trail: Vec<VarId>,
    /// The subsequence of the trail assigned by decision.
    pub decisions: Vec<VarId>,
    /// Gates trail recording: domain writes before `solve()` leave no trace.
    pub inside_solve: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            domains: vec![BinaryDomain::universal()],
            implications: vec![Implication::default()],
            watches: WatchIndex::default(),
            dirty: VecDeque::new(),
            trail: Vec::new(),
            decisions: Vec::new(),
            inside_solve: false,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.domains.len() - 1
    }

    /// Current decision level: the number of live decisions.
    pub fn level(&self) -> Level {
        self.decisions.len() as Level
    }

    pub fn domain(&self, var: VarId) -> BinaryDomain {
        self.domains[var as usize]
    }

    /// Sets the domain of a variable.
    ///
    /// During solving this also appends to the trail and the dirty queue and
    /// records the implication used later by conflict analysis.
    pub fn set_domain(&mut self, var: VarId, domain: BinaryDomain, cause: Cause) {
        match cause {
            Cause::Decision => {
                tracing::debug!("L{}: setting var{} := {} by decision", self.level(), var, domain);
            }
            Cause::Clause(clause) => {
                tracing::debug!("L{}: setting var{} := {} by clause {}", self.level(), var, domain, clause);
            }
        }
        if self.domains[var as usize] == domain {
            return;
        }
        self.domains[var as usize] = domain;
        if self.inside_solve {
            self.dirty.push_back(var);
            self.trail.push(var);
            self.implications[var as usize] =
                Implication { cause, depth: self.trail.len() as u32, level: self.level() };
        }
    }

    /// Registers `clause` to be revisited when `value` is removed from the
    /// domain of `var`.
    pub fn watch_value_removal(&mut self, clause: ClauseHandle, var: VarId, value: bool) {
        self.watches.add(value, var, clause);
    }
}
