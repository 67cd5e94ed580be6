//! # satori-trivial
//!
//! A SAT solver with a trivial search algorithm.
//!
//! Exhaustive assignment enumeration with a per-clause conflict check and no
//! propagation or conflict analysis. It exists as a testing reference: the
//! CDCL engine must agree with it on every SAT/UNSAT verdict, which makes it
//! the oracle of the differential test harness.

use satori_base::{BinaryDomain, Error, Literal, Result, SolveStatus, VarId, MAX_VAR};
use std::fmt;

/// Default bound on enumeration attempts.
const DEFAULT_MAX_ATTEMPTS: u64 = 1 << 32;

/// A disjunction of literals, stored as-is.
#[derive(Debug, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
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
}

impl fmt::Display for Clause {
    /// Renders as `{1, -2}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, lit) in self.literals.iter().enumerate() {
            if index != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, "}}")
    }
}

/// The exhaustive reference solver.
pub struct TrivialSolver {
    max_attempts: u64,
    /// Domains indexed by variable handle; slot 0 is a dead sentinel so that
    /// handles line up with signed-literal magnitudes.
    domains: Vec<BinaryDomain>,
    clauses: Vec<Clause>,
}

impl TrivialSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// A solver whose enumeration gives up after `max_attempts` conflicting
    /// assignments.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u64) -> Self {
        Self {
            max_attempts,
            domains: vec![BinaryDomain::universal()],
            clauses: Vec::new(),
        }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.domains.len() - 1
    }

    /// Appends a fresh variable with a universal domain.
    pub fn add_var(&mut self) -> Result<VarId> {
        self.add_var_with_domain(BinaryDomain::universal())
    }

    /// Appends a fresh variable with a pre-restricted domain.
    pub fn add_var_with_domain(&mut self, domain: BinaryDomain) -> Result<VarId> {
        if self.domains.len() > MAX_VAR as usize {
            return Err(Error::IndexOverflow("variable"));
        }
        self.domains.push(domain);
        Ok((self.domains.len() - 1) as VarId)
    }

    /// Appends an empty clause and returns it for literal registration.
    pub fn add_clause(&mut self) -> &mut Clause {
        let handle = self.clauses.len();
        self.clauses.push(Clause::default());
        &mut self.clauses[handle]
    }

    /// The assigned value of a variable. Meaningful only after a `Sat`
    /// verdict.
    #[must_use]
    pub fn value(&self, var: VarId) -> bool {
        self.domains[var as usize].min()
    }

    #[must_use]
    pub fn current_domain(&self, var: VarId) -> BinaryDomain {
        self.domains[var as usize]
    }

    /// Decides satisfiability by exhaustive enumeration in handle order.
    ///
    /// Rejects clauses referencing unknown variables before any search work.
    /// Returns `Unknown` once the attempt budget is spent.
    pub fn solve(&mut self) -> Result<SolveStatus> {
        self.validate_clauses()?;
        let (status, attempts) = self.solve_recursive(1, 0);
        tracing::debug!("exhaustive search finished: {} after {} attempts", status, attempts);
        Ok(status)
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

    /// Depth-first enumeration over the variables at `depth` and beyond.
    ///
    /// On `Sat` the witness assignment is left in the domains; on any other
    /// outcome the domains are restored on the way out.
    fn solve_recursive(&mut self, depth: usize, mut attempts: u64) -> (SolveStatus, u64) {
        if self.has_conflict() {
            let status =
                if attempts >= self.max_attempts { SolveStatus::Unknown } else { SolveStatus::Unsat };
            return (status, attempts + 1);
        }
        for var in depth..self.domains.len() {
            if !self.domains[var].is_universal() {
                continue;
            }
            let saved = self.domains[var];
            for value in BinaryDomain::universal().iter() {
                self.domains[var] = BinaryDomain::singleton(value);
                let (status, next_attempts) = self.solve_recursive(var + 1, attempts);
                attempts = next_attempts;
                match status {
                    SolveStatus::Sat => return (SolveStatus::Sat, attempts),
                    SolveStatus::Unknown => {
                        self.domains[var] = saved;
                        return (SolveStatus::Unknown, attempts);
                    }
                    SolveStatus::Unsat => {}
                }
            }
            self.domains[var] = saved;
            return (SolveStatus::Unsat, attempts);
        }
        (SolveStatus::Sat, attempts)
    }

    fn has_conflict(&self) -> bool {
        self.clauses.iter().any(|clause| self.clause_conflicts(clause))
    }

    /// A clause conflicts once no literal's polarity remains in its
    /// variable's domain.
    fn clause_conflicts(&self, clause: &Clause) -> bool {
        clause
            .literals()
            .all(|lit| !self.domains[lit.var() as usize].contains(lit.is_positive()))
    }
}

impl Default for TrivialSolver {
    fn default() -> Self {
        Self::new()
    }
}
