//! Bytecode compilation errors.

use thiserror::Error;

/// Errors that can occur during bytecode compilation.
///
/// These are resource-limit errors only; the lowering rules themselves
/// (§4.3) never fail on a well-formed tree.
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    /// A jump's distance did not fit in the instruction's `i32` payload.
    /// Unreachable for any tree that fits in memory in the first place, but
    /// kept so patching has an honest failure mode instead of a panic.
    #[error("jump target {target} does not fit in a 32-bit instruction payload")]
    JumpTooFar { target: usize },
}
