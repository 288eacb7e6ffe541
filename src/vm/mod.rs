//! Bytecode backend: a stack machine that executes a compiled [`Code`]
//! array over a [`crate::context::Context`].
//!
//! ## Example
//!
//! ```
//! use triptych::context::Context;
//! use triptych::compiler::compile;
//! use triptych::vm::run;
//! use triptych::expr::constant;
//!
//! let mut ctx = Context::new(16);
//! let code = compile(&constant(42));
//! assert_eq!(run(&code, &mut ctx), Ok(42.0));
//! ```

mod code;
mod error;
mod instruction;
mod runtime;
mod stack;

pub use code::Code;
pub use error::VmError;
pub use instruction::Instruction;
pub use runtime::{run, run_with_capacity, DEFAULT_STACK_CAPACITY};

pub(crate) use stack::Stack;
