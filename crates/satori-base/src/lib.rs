//! # satori-base
//!
//! Core types and utilities for the Satori SAT solver.
//!
//! This crate provides the foundational building blocks shared by every
//! other Satori crate:
//!
//! - **Value Types**: variable handles, literals, the two-element Boolean
//!   domain, solve statuses
//! - **Error Types**: unified error handling across the solvers
//! - **Utilities**: small helpers used by tests and strategies

pub mod error;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use types::{BinaryDomain, Level, Literal, SolveStatus, VarId, MAX_VAR};
