//! Tests for the integer-to-Boolean encoding layer.

use satori_base::utils::XorShift64;
use satori_base::{BinaryDomain, SolveStatus, VarId};
use satori_cdcl::{CdclSolver, DecisionStrategy};
use satori_encode::IntToBoolVars;
use std::collections::BTreeSet;

#[test]
fn empty_value_set_is_unsat() {
    let mut solver = CdclSolver::new();
    let mut encoder = IntToBoolVars::new();
    let _var = encoder.add_var(&mut solver, []).unwrap();
    assert_eq!(solver.solve().unwrap(), SolveStatus::Unsat);
}

#[test]
fn single_value_domains_decode_to_that_value() {
    for value in [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 255, -17] {
        let mut solver = CdclSolver::new();
        let mut encoder = IntToBoolVars::new();
        let var = encoder.add_var(&mut solver, [value]).unwrap();
        assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
        assert_eq!(encoder.value(&solver, var).unwrap(), value);
    }
}

#[test]
fn two_value_domain_decodes_into_the_domain() {
    let mut solver = CdclSolver::new();
    let mut encoder = IntToBoolVars::new();
    let var = encoder.add_var(&mut solver, [3, 8]).unwrap();
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    assert!([3, 8].contains(&encoder.value(&solver, var).unwrap()));
}

#[test]
fn multi_value_domain_decodes_into_the_domain() {
    let domain = [0i64, 1, 2, 10, 11, 255];
    let mut solver = CdclSolver::new();
    let mut encoder = IntToBoolVars::new();
    let var = encoder.add_var(&mut solver, domain).unwrap();
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    let value = encoder.value(&solver, var).unwrap();
    assert!(domain.contains(&value));
}

#[test]
fn exactly_one_one_hot_bit_is_set() {
    let domain = [1i64, 4, 9, 16];
    let mut solver = CdclSolver::new();
    let mut encoder = IntToBoolVars::new();
    let var = encoder.add_var(&mut solver, domain).unwrap();
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    let set_bits = encoder
        .one_hot_vars(var)
        .into_iter()
        .filter(|&bit| solver.value(bit))
        .count();
    assert_eq!(set_bits, 1);
}

/// Strategy that jumps to a random interesting variable and flips a coin for
/// the value; exercises witness diversity without touching correctness.
struct RandomChoice {
    rng: XorShift64,
    interesting: Vec<VarId>,
}

impl DecisionStrategy for RandomChoice {
    fn choose_value(&mut self, domain: BinaryDomain) -> bool {
        if domain.is_singleton() {
            domain.min()
        } else {
            self.rng.next_bool()
        }
    }

    fn first_var_to_choose(&mut self, _prev: Option<VarId>) -> VarId {
        if self.interesting.is_empty() {
            return 1;
        }
        let index = self.rng.next() as usize % self.interesting.len();
        self.interesting[index]
    }
}

#[test]
fn random_strategy_reaches_several_values() {
    let domain = [0i64, 1, 2, 10, 11, 255];
    let mut reached = BTreeSet::new();
    for seed in 1..=60u64 {
        let mut solver = CdclSolver::with_strategy(RandomChoice {
            rng: XorShift64::new(seed),
            interesting: Vec::new(),
        });
        let mut encoder = IntToBoolVars::new();
        let var = encoder.add_var(&mut solver, domain).unwrap();
        solver.strategy_mut().interesting = encoder.one_hot_vars(var);
        assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
        let value = encoder.value(&solver, var).unwrap();
        assert!(domain.contains(&value));
        reached.insert(value);
    }
    assert!(reached.len() > 1, "random strategy always found the same witness");
}

fn add_any_false(solver: &mut CdclSolver, left: VarId, right: VarId) {
    let clause = solver.add_clause().unwrap();
    clause.add_literal(left, false);
    clause.add_literal(right, false);
}

/// All-different over encoded integers: every pair of integers excludes
/// sharing a one-hot position.
fn all_different(num_ints: usize, num_vals: i64) -> (CdclSolver, IntToBoolVars, Vec<usize>) {
    let mut solver = CdclSolver::new();
    let mut encoder = IntToBoolVars::new();
    let vars: Vec<usize> = (0..num_ints)
        .map(|_| encoder.add_var(&mut solver, 0..num_vals).unwrap())
        .collect();
    for bit in 0..num_vals as usize {
        for i in 0..vars.len() {
            for j in i + 1..vars.len() {
                let left = encoder.one_hot_vars(vars[i])[bit];
                let right = encoder.one_hot_vars(vars[j])[bit];
                add_any_false(&mut solver, left, right);
            }
        }
    }
    (solver, encoder, vars)
}

#[test]
fn encoded_pigeonhole_is_unsat() {
    let (mut solver, _, _) = all_different(6, 5);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Unsat);
}

#[test]
fn encoded_all_different_is_sat_with_distinct_values() {
    let (mut solver, encoder, vars) = all_different(6, 6);
    assert_eq!(solver.solve().unwrap(), SolveStatus::Sat);
    let values: BTreeSet<i64> = vars
        .iter()
        .map(|&var| encoder.value(&solver, var).unwrap())
        .collect();
    assert_eq!(values.len(), vars.len(), "integers are not pairwise distinct");
}
