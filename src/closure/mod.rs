//! Closure-lowering backend: compiles the tree once into a nested closure,
//! trading tree traversal for indirect calls.
//!
//! ## Example
//!
//! ```
//! use triptych::context::Context;
//! use triptych::closure::lower;
//! use triptych::expr::constant;
//!
//! let mut ctx = Context::new(16);
//! assert_eq!(lower(&constant(42)).call(&mut ctx), 42.0);
//! ```

mod lower;

pub use lower::{lower, Closure};
