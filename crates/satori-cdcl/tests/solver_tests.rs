//! Scenario tests for the CDCL engine.

use satori_base::{BinaryDomain, Error, SolveStatus, VarId};
use satori_cdcl::CdclSolver;

fn create_vars(solver: &mut CdclSolver, num_vars: usize) -> Vec<VarId> {
    (0..num_vars).map(|_| solver.add_var().unwrap()).collect()
}

#[test]
fn empty_problem_is_sat() {
    let mut solver = CdclSolver::new();
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
}

#[test]
fn initially_set_problem() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var_with_domain(BinaryDomain::singleton(true)).unwrap();
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!(solver.value(var));
}

#[test]
fn tiny_problem_false() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var().unwrap();
    solver.add_clause().unwrap().add_literal(var, false);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!(!solver.value(var));
}

#[test]
fn tiny_problem_true() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var().unwrap();
    solver.add_clause().unwrap().add_literal(var, true);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!(solver.value(var));
}

#[test]
fn tiny_problem_unsat() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var().unwrap();
    solver.add_clause().unwrap().add_literal(var, false);
    solver.add_clause().unwrap().add_literal(var, true);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Unsat);
}

#[test]
fn implication_chain_is_forced() {
    let mut solver = CdclSolver::new();
    let vars = create_vars(&mut solver, 3);

    let implies0_1 = solver.add_clause().unwrap();
    implies0_1.add_literal(vars[0], false);
    implies0_1.add_literal(vars[1], true);

    let implies1_2 = solver.add_clause().unwrap();
    implies1_2.add_literal(vars[1], false);
    implies1_2.add_literal(vars[2], true);

    solver.add_clause().unwrap().add_literal(vars[0], true);

    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!(solver.value(vars[0]) && solver.value(vars[1]) && solver.value(vars[2]));
}

#[test]
fn tautological_clause_changes_nothing() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var().unwrap();
    let tautology = solver.add_clause().unwrap();
    tautology.add_literal(var, true);
    tautology.add_literal(var, false);
    solver.add_clause().unwrap().add_literal(var, false);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!(!solver.value(var));
}

#[test]
fn duplicate_literals_are_merged() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var().unwrap();
    let clause = solver.add_clause().unwrap();
    clause.add_literal(var, true);
    clause.add_literal(var, true);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!(solver.value(var));
}

#[test]
fn out_of_range_variable_is_rejected() {
    let mut solver = CdclSolver::new();
    let var = solver.add_var().unwrap();
    let clause = solver.add_clause().unwrap();
    clause.add_literal(var, false);
    clause.add_literal(var + 1, true);
    match solver.solve() {
        Err(Error::OutOfRange { var: bad, num_vars }) => {
            assert_eq!(bad, var + 1);
            assert_eq!(num_vars, 1);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn resolving_a_rebuilt_instance_gives_the_same_status() {
    let build = || {
        let mut solver = CdclSolver::new();
        let vars = create_vars(&mut solver, 3);
        let clause = solver.add_clause().unwrap();
        clause.add_literal(vars[0], true);
        clause.add_literal(vars[1], true);
        let clause = solver.add_clause().unwrap();
        clause.add_literal(vars[0], false);
        clause.add_literal(vars[2], true);
        let clause = solver.add_clause().unwrap();
        clause.add_literal(vars[1], false);
        clause.add_literal(vars[2], false);
        solver
    };
    let first = build().solve().unwrap();
    let second = build().solve().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, SolveStatus::Sat);
}

struct OneHotInt {
    vars: Vec<VarId>,
}

/// All-different over one-hot encoded integers.
///
/// With more integers than legal values this is the pigeonhole principle,
/// which resolution-based conflict analysis can only refute in exponential
/// time; the sizes here keep that affordable.
struct AllDifferentProblem {
    integer_values: Vec<OneHotInt>,
    solver: CdclSolver,
}

impl AllDifferentProblem {
    fn new(num_ints: usize, num_vals: usize) -> Self {
        let mut solver = CdclSolver::new();
        let integer_values: Vec<OneHotInt> = (0..num_ints)
            .map(|_| OneHotInt { vars: create_vars(&mut solver, num_vals) })
            .collect();
        let mut problem = Self { integer_values, solver };
        for index in 0..num_ints {
            problem.constrain_at_least_one(index);
            problem.constrain_at_most_one(index);
        }
        problem.constrain_all_different();
        problem
    }

    fn constrain_at_least_one(&mut self, index: usize) {
        let at_least_one = self.solver.add_clause().unwrap();
        for &var in &self.integer_values[index].vars {
            at_least_one.add_literal(var, true);
        }
    }

    fn constrain_at_most_one(&mut self, index: usize) {
        let vars = self.integer_values[index].vars.clone();
        for i in 0..vars.len() {
            for j in i + 1..vars.len() {
                self.add_any_false(vars[i], vars[j]);
            }
        }
    }

    fn add_any_false(&mut self, left: VarId, right: VarId) {
        let any_false = self.solver.add_clause().unwrap();
        any_false.add_literal(left, false);
        any_false.add_literal(right, false);
    }

    fn constrain_all_different(&mut self) {
        for bit in 0..self.integer_values[0].vars.len() {
            for i in 0..self.integer_values.len() {
                for j in i + 1..self.integer_values.len() {
                    let left = self.integer_values[i].vars[bit];
                    let right = self.integer_values[j].vars[bit];
                    self.add_any_false(left, right);
                }
            }
        }
    }
}

#[test]
fn pigeonhole_problem_is_unsat() {
    const NUM_INTS: usize = 6;
    let mut problem = AllDifferentProblem::new(NUM_INTS, NUM_INTS - 1);
    assert_eq!(problem.solver.solve().unwrap(), SolveStatus::Unsat);
}

#[test]
fn all_different_problem_is_sat() {
    const NUM_INTS: usize = 6;
    let mut problem = AllDifferentProblem::new(NUM_INTS, NUM_INTS);
    assert_eq!(problem.solver.solve().unwrap(), SolveStatus::Sat);

    let mut found_bit = vec![false; problem.integer_values[0].vars.len()];
    for integer_value in &problem.integer_values {
        let mut found_bit_in_value = false;
        for (bit, &var) in integer_value.vars.iter().enumerate() {
            let bit_value = problem.solver.value(var);
            assert!(!(found_bit[bit] && bit_value), "two integers share value {bit}");
            found_bit[bit] = bit_value || found_bit[bit];

            assert!(!(found_bit_in_value && bit_value), "integer with two values");
            found_bit_in_value = found_bit_in_value || bit_value;
        }
        assert!(found_bit_in_value, "integer with no value");
    }
}

/// Every polarity combination over `NUM_VARS` variables: unsatisfiable, and
/// the full search tree needs `2^(NUM_VARS-1) - 1` backjumps to prove it.
struct AllLiteralCombinations {
    solver: CdclSolver,
}

impl AllLiteralCombinations {
    const NUM_VARS: usize = 10;

    fn new(max_backtracks: u64) -> Self {
        let mut solver = CdclSolver::with_max_backtracks(max_backtracks);
        let vars = create_vars(&mut solver, Self::NUM_VARS);
        for literal_bits in 0u32..(1 << Self::NUM_VARS) {
            let clause = solver.add_clause().unwrap();
            for (index, &var) in vars.iter().enumerate() {
                clause.add_literal(var, (literal_bits >> index) & 1 == 1);
            }
        }
        Self { solver }
    }
}

#[test]
fn exact_backtrack_budget_reaches_unsat() {
    let backtracks_required = (1u64 << (AllLiteralCombinations::NUM_VARS - 1)) - 1;
    let mut problem = AllLiteralCombinations::new(backtracks_required);
    assert_eq!(problem.solver.solve().unwrap(), SolveStatus::Unsat);
}

#[test]
fn one_less_backtrack_is_unknown() {
    let backtracks_required = (1u64 << (AllLiteralCombinations::NUM_VARS - 1)) - 1;
    let mut problem = AllLiteralCombinations::new(backtracks_required - 1);
    assert_eq!(problem.solver.solve().unwrap(), SolveStatus::Unknown);
}
