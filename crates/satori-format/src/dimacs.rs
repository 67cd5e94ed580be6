//! DIMACS CNF format parser.
//!
//! The accepted dialect is strict: lines starting with `c` are comments, the
//! first non-comment non-empty line must be the `p cnf <vars> <clauses>`
//! header, and every following non-empty line is one clause - whitespace
//! separated signed integers closed by a single `0`.

use satori_base::{Error, Result};
use serde::{Deserialize, Serialize};

/// An in-memory CNF formula in signed-literal convention.
///
/// `num_vars`/`num_clauses` carry the header counts; `clauses` holds one
/// signed-integer list per clause, without the terminating `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimacsFormula {
    pub num_vars: u32,
    pub num_clauses: u32,
    pub clauses: Vec<Vec<i32>>,
}

impl DimacsFormula {
    /// Parses DIMACS CNF text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('c'));

        let Some((header_line, header)) = lines.next() else {
            return Err(Error::InvalidInput("all lines are either empty or comments".into()));
        };
        let (num_vars, num_clauses) = parse_header(header_line, header)?;

        let mut clauses = Vec::with_capacity(num_clauses as usize);
        for (line_num, line) in lines {
            clauses.push(parse_clause(line_num, line)?);
        }
        Ok(Self { num_vars, num_clauses, clauses })
    }

    /// Parses the JSON rendering produced by [`DimacsFormula::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::InvalidInput(err.to_string()))
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| Error::InvalidInput(err.to_string()))
    }

    /// Renders back to DIMACS text.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars, self.num_clauses);
        for clause in &self.clauses {
            for lit in clause {
                out.push_str(&format!("{lit} "));
            }
            out.push_str("0\n");
        }
        out
    }
}

/// Parses `p cnf <vars> <clauses>`. The variable count must fit the positive
/// signed 32-bit range so every handle keeps a signed rendering.
fn parse_header(line_num: usize, line: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidInput("invalid header".into());
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("p") || tokens.next() != Some("cnf") {
        tracing::debug!("{}: expecting a line prefix 'p cnf' but got '{}'", line_num, line);
        return Err(invalid());
    }
    let mut parse_count = |name: &str| -> Result<u32> {
        let Some(count) = tokens.next().and_then(|token| token.parse::<u32>().ok()) else {
            tracing::debug!("{}: expecting an unsigned {} count in header '{}'", line_num, name, line);
            return Err(invalid());
        };
        Ok(count)
    };
    let num_vars = parse_count("variable")?;
    let num_clauses = parse_count("clause")?;
    if num_vars > i32::MAX as u32 {
        tracing::debug!("{}: variable count {} exceeds the signed range", line_num, num_vars);
        return Err(invalid());
    }
    if let Some(junk) = tokens.next() {
        tracing::debug!("{}: junk after header '{}'", line_num, junk);
        return Err(invalid());
    }
    Ok((num_vars, num_clauses))
}

/// Parses one clause line into its signed literals.
fn parse_clause(line_num: usize, line: &str) -> Result<Vec<i32>> {
    let mut literals = Vec::new();
    let mut closed = false;
    for token in line.split_whitespace() {
        if closed {
            tracing::debug!("{}: 0 should be only at the end of the line '{}'", line_num, line);
            return Err(Error::InvalidInput("more than one 0 per line".into()));
        }
        let Ok(lit) = token.parse::<i32>() else {
            tracing::debug!("{}: invalid literal '{}' in line '{}'", line_num, token, line);
            return Err(Error::InvalidInput(format!("invalid literal '{token}'")));
        };
        if lit == 0 {
            closed = true;
        } else {
            literals.push(lit);
        }
    }
    if !closed {
        tracing::debug!("{}: missing 0 at the end of the line '{}'", line_num, line);
        return Err(Error::InvalidInput("missing 0 at end of line".into()));
    }
    Ok(literals)
}
