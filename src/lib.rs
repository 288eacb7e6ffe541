//! Three execution backends for a tiny shared-memory expression language,
//! built to benchmark a tree-walking evaluator, a closure-lowering
//! compiler, and a stack-based bytecode VM against each other.
//!
//! All three backends are semantically equivalent: running the same
//! [`expr::Expr`] tree against an equally-initialized [`context::Context`]
//! through [`evaluator::evaluate`], [`closure::lower`], or
//! [`compiler::compile`] followed by [`vm::run`] produces the same `f64`
//! and leaves the context in the same state.

pub mod closure;
pub mod compiler;
pub mod context;
pub mod evaluator;
pub mod expr;
pub mod programs;
pub mod vm;
