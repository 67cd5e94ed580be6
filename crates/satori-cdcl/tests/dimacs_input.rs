//! End-to-end checks for DIMACS-provided instances.

use satori_base::{Literal, SolveStatus};
use satori_cdcl::CdclSolver;
use satori_format::DimacsFormula;

fn solve_text(text: &str) -> (CdclSolver, SolveStatus) {
    let formula = DimacsFormula::parse(text).unwrap();
    let mut solver = CdclSolver::new();
    for _ in 0..formula.num_vars {
        solver.add_var().unwrap();
    }
    for literals in &formula.clauses {
        let clause = solver.add_clause().unwrap();
        for &lit in literals {
            let literal = Literal::from_dimacs(lit);
            clause.add_literal(literal.var(), literal.is_positive());
        }
    }
    let status = solver.solve().unwrap();
    (solver, status)
}

#[test]
fn positive_unit_clause() {
    let (solver, status) = solve_text("p cnf 1 1\n1 0\n");
    assert_eq!(status, SolveStatus::Sat);
    assert!(solver.value(1));
}

#[test]
fn negative_unit_clause() {
    let (solver, status) = solve_text("p cnf 1 1\n-1 0\n");
    assert_eq!(status, SolveStatus::Sat);
    assert!(!solver.value(1));
}

#[test]
fn contradicting_unit_clauses() {
    let (_, status) = solve_text("p cnf 1 2\n1 0\n-1 0\n");
    assert_eq!(status, SolveStatus::Unsat);
}

#[test]
fn implication_chain_from_unit() {
    let (solver, status) = solve_text("p cnf 3 3\n-1 2 0\n-2 3 0\n1 0\n");
    assert_eq!(status, SolveStatus::Sat);
    assert!(solver.value(1));
    assert!(solver.value(2));
    assert!(solver.value(3));
}

#[test]
fn parsed_and_rendered_instances_agree() {
    let text = "p cnf 4 5\n1 -2 3 0\n2 3 0\n-1 2 -3 4 0\n1 -2 -3 -4 0\n-3 0\n";
    let formula = DimacsFormula::parse(text).unwrap();
    let (_, direct) = solve_text(text);
    let (_, rendered) = solve_text(&formula.to_dimacs());
    assert_eq!(direct, rendered);
}
