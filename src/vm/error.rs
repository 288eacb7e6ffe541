//! Errors raised by the bytecode interpreter.

use thiserror::Error;

/// Errors the bytecode interpreter can raise.
///
/// A well-formed compiled program never triggers either variant; both exist
/// to fail safely on corrupted or hand-assembled bytecode instead of
/// panicking or reading out of bounds.
#[derive(Debug, Error, PartialEq)]
pub enum VmError {
    /// The instruction pointer left the bounds of the instruction array,
    /// either by running off the end via a bad jump target or by decoding
    /// an instruction that does not belong at that address.
    #[error("instruction pointer {ip} is outside the program (length {len})")]
    InvalidProgram { ip: usize, len: usize },

    /// The operand stack underflowed or overflowed its fixed capacity.
    #[error("operand stack underflow or overflow")]
    StackCorruption,
}
