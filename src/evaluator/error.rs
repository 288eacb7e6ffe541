//! Errors raised by the tree-walking evaluator.

use thiserror::Error;

/// Errors the tree-walking evaluator can raise.
///
/// Division/modulo by zero are deliberately absent here: per spec §7
/// (`NumericResult`) they are not errors, they produce IEEE-754 `+-inf`/
/// `NaN` and flow through the program like any other double.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    /// Recursion depth exceeded `max_depth`. The evaluator and the closure
    /// backend both recurse on Rust's call stack, so without this guard a
    /// pathological tree would abort the process with a stack overflow
    /// instead of returning a catchable error.
    #[error("evaluation depth {depth} exceeds maximum of {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },
}
