//! Satori CLI - command-line interface for the SAT solvers.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use satori_base::{Literal, SolveStatus, VarId};
use satori_cdcl::CdclSolver;
use satori_format::DimacsFormula;
use satori_trivial::TrivialSolver;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "satori")]
#[command(version, about = "CDCL and exhaustive-reference SAT solvers", long_about = None)]
struct Cli {
    /// Input file in DIMACS CNF format
    input: PathBuf,

    /// The solver to use
    #[arg(long, value_enum)]
    solver: SolverKind,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    Trivial,
    Cdcl,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let formula = DimacsFormula::parse(&text)?;
    tracing::info!(
        "loaded DIMACS: {} variables, {} clauses",
        formula.num_vars,
        formula.clauses.len()
    );

    let report = match cli.solver {
        SolverKind::Cdcl => run_cdcl(&formula)?,
        SolverKind::Trivial => run_trivial(&formula)?,
    };
    println!("{report}");
    Ok(())
}

fn run_cdcl(formula: &DimacsFormula) -> anyhow::Result<String> {
    let mut solver = CdclSolver::new();
    for _ in 0..formula.num_vars {
        solver.add_var()?;
    }
    for literals in &formula.clauses {
        let clause = solver.add_clause()?;
        for &lit in literals {
            let literal = Literal::from_dimacs(lit);
            clause.add_literal(literal.var(), literal.is_positive());
        }
    }
    let status = solver.solve()?;
    Ok(render(status, formula.num_vars, |var| solver.value(var)))
}

fn run_trivial(formula: &DimacsFormula) -> anyhow::Result<String> {
    let mut solver = TrivialSolver::new();
    for _ in 0..formula.num_vars {
        solver.add_var()?;
    }
    for literals in &formula.clauses {
        let clause = solver.add_clause();
        for &lit in literals {
            let literal = Literal::from_dimacs(lit);
            clause.add_literal(literal.var(), literal.is_positive());
        }
    }
    let status = solver.solve()?;
    Ok(render(status, formula.num_vars, |var| solver.value(var)))
}

/// One output line: `SAT v1=0 v2=1 ...`, or the bare status token.
fn render(status: SolveStatus, num_vars: u32, value: impl Fn(VarId) -> bool) -> String {
    let mut line = status.to_string();
    if status == SolveStatus::Sat {
        for var in 1..=num_vars {
            let _ = write!(line, " v{}={}", var, u8::from(value(var)));
        }
    }
    line
}
