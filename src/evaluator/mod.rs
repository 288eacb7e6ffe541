//! Tree-walking evaluator: recursive interpretation directly over the
//! expression tree.
//!
//! ## Design Principles
//!
//! - **Stack-safe**: depth tracking prevents stack overflow from deeply
//!   nested expressions ([`EvalOptions::max_depth`]).
//! - **No short-circuit**: `and`/`or` evaluate both operands unconditionally,
//!   matching the closure and bytecode backends exactly.
//!
//! ## Example
//!
//! ```
//! use triptych::context::Context;
//! use triptych::evaluator::evaluate;
//! use triptych::expr::constant;
//!
//! let mut ctx = Context::new(16);
//! assert_eq!(evaluate(&constant(42), &mut ctx), 42.0);
//! ```

mod error;
mod eval;

pub use error::EvalError;
pub use eval::{evaluate, evaluate_with_options, EvalOptions};

pub(crate) use eval::{eval_binary, eval_unary};
