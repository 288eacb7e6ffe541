//! The stack machine: executes a compiled [`Code`] array over a [`Context`].

use tracing::error;

use crate::context::Context;
use crate::vm::{Code, Instruction, Stack, VmError};

/// Default operand stack capacity. 1024 is adequate for the reference
/// programs (see spec §4.4); callers compiling deeper expressions should
/// size their own stack with [`run_with_capacity`].
pub const DEFAULT_STACK_CAPACITY: usize = 1024;

/// Run `code` against `ctx` using the default operand stack capacity.
pub fn run(code: &Code, ctx: &mut Context) -> Result<f64, VmError> {
    run_with_capacity(code, ctx, DEFAULT_STACK_CAPACITY)
}

/// Run `code` against `ctx` with an explicitly sized operand stack.
pub fn run_with_capacity(code: &Code, ctx: &mut Context, capacity: usize) -> Result<f64, VmError> {
    let mut stack = Stack::new(capacity);
    let instructions = &code.instructions;
    let len = instructions.len();
    let mut ip: usize = 0;

    while ip < len {
        let mut next_ip = ip + 1;
        match instructions[ip] {
            Instruction::Noop => {}

            Instruction::Push(v) => stack.push(v)?,
            Instruction::Pop => {
                stack.pop()?;
            }

            Instruction::Jmp(k) => next_ip = resolve_target(k, len, ip)?,
            Instruction::PopJmpIfFalse(k) => {
                if stack.pop()? == 0.0 {
                    next_ip = resolve_target(k, len, ip)?;
                }
            }
            Instruction::PopJmpIfTrue(k) => {
                if stack.pop()? != 0.0 {
                    next_ip = resolve_target(k, len, ip)?;
                }
            }

            Instruction::Get(i) => stack.push(ctx.get_at(i as usize))?,
            Instruction::Set(i) => {
                let v = stack.pop()?;
                ctx.set_at(i as usize, v);
            }
            Instruction::GetIndirect => {
                let a = stack.pop()?;
                stack.push(ctx.get(a))?;
            }
            Instruction::SetIndirect => {
                let (a, v) = stack.pop_two()?;
                ctx.set(a, v);
            }

            Instruction::Add => binary(&mut stack, |a, b| a + b)?,
            Instruction::Sub => binary(&mut stack, |a, b| a - b)?,
            Instruction::Mul => binary(&mut stack, |a, b| a * b)?,
            Instruction::Div => binary(&mut stack, |a, b| a / b)?,
            Instruction::Mod => binary(&mut stack, |a, b| a % b)?,
            Instruction::Eq => binary(&mut stack, |a, b| bool_to_f64(a == b))?,
            Instruction::Neq => binary(&mut stack, |a, b| bool_to_f64(a != b))?,
            Instruction::Lt => binary(&mut stack, |a, b| bool_to_f64(a < b))?,
            Instruction::Gt => binary(&mut stack, |a, b| bool_to_f64(a > b))?,
            Instruction::Lte => binary(&mut stack, |a, b| bool_to_f64(a <= b))?,
            Instruction::Gte => binary(&mut stack, |a, b| bool_to_f64(a >= b))?,
            Instruction::And => binary(&mut stack, |a, b| bool_to_f64(a != 0.0 && b != 0.0))?,
            Instruction::Or => binary(&mut stack, |a, b| bool_to_f64(a != 0.0 || b != 0.0))?,

            Instruction::Not => {
                let v = stack.pop()?;
                stack.push(bool_to_f64(v == 0.0))?;
            }
        }
        ip = next_ip;
    }

    Ok(if stack.is_empty() { 0.0 } else { stack.pop()? })
}

#[inline]
fn binary(stack: &mut Stack, f: impl FnOnce(f64, f64) -> f64) -> Result<(), VmError> {
    let (a, b) = stack.pop_two()?;
    stack.push(f(a, b))
}

fn bool_to_f64(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn resolve_target(k: i32, len: usize, ip: usize) -> Result<usize, VmError> {
    // A target equal to `len` is valid: it means "fall off the end", the
    // same as an ordinary instruction reaching the last address.
    if k < 0 || k as usize > len {
        error!(ip, target = k, program_len = len, "jump target out of range");
        return Err(VmError::InvalidProgram { ip, len });
    }
    Ok(k as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::Instruction::*;

    #[test]
    fn constant_only() {
        let mut ctx = Context::new(16);
        let code = Code::new(vec![Push(42.0)]);
        assert_eq!(run(&code, &mut ctx), Ok(42.0));
    }

    #[test]
    fn memory_round_trip() {
        let mut ctx = Context::new(16);
        let code = Code::new(vec![Push(7.0), Set(5), Get(5)]);
        assert_eq!(run(&code, &mut ctx), Ok(7.0));
        assert_eq!(ctx.get(5.0), 7.0);
    }

    #[test]
    fn empty_program_yields_zero() {
        let mut ctx = Context::new(16);
        assert_eq!(run(&Code::new(vec![]), &mut ctx), Ok(0.0));
    }

    #[test]
    fn conditional_jump() {
        let mut ctx = Context::new(16);
        // if 1 == 1 then 3 else 4
        let code = Code::new(vec![
            Push(1.0),
            Push(1.0),
            Eq,
            PopJmpIfFalse(6),
            Push(3.0),
            Jmp(7),
            Push(4.0),
        ]);
        assert_eq!(run(&code, &mut ctx), Ok(3.0));
    }

    #[test]
    fn out_of_range_jump_is_invalid_program() {
        let mut ctx = Context::new(16);
        let code = Code::new(vec![Jmp(99)]);
        assert_eq!(run(&code, &mut ctx), Err(VmError::InvalidProgram { ip: 0, len: 1 }));
    }

    #[test]
    fn indirect_memory_access() {
        let mut ctx = Context::new(16);
        ctx.set_at(3, 9.0);
        let code = Code::new(vec![Push(3.0), GetIndirect]);
        assert_eq!(run(&code, &mut ctx), Ok(9.0));
    }
}
