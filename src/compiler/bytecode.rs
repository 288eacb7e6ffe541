//! Bytecode compiler: linearizes the tree into an instruction array with
//! constant-folded addressing and forward-patched jump targets.

use crate::compiler::CompileError;
use crate::expr::{BinOp, Expr, UnOp};
use crate::vm::{Code, Instruction};

/// Compile `root` into bytecode, evaluated for its resulting value (the
/// top-level `useValue` is always `true`: the whole point of running a
/// compiled program is to get a result back).
///
/// Panics only if the tree is so large a jump offset overflows `i32`; see
/// [`try_compile`] for a fallible version.
pub fn compile(root: &Expr) -> Code {
    try_compile(root).expect("jump target overflow during compilation")
}

/// Fallible version of [`compile`].
pub fn try_compile(root: &Expr) -> Result<Code, CompileError> {
    let mut compiler = Compiler::new();
    compiler.compile_expr(root, true)?;
    Ok(Code::new(compiler.instructions))
}

struct Compiler {
    instructions: Vec<Instruction>,
}

impl Compiler {
    fn new() -> Self {
        Self { instructions: Vec::new() }
    }

    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    /// Reserve a slot for a jump whose target isn't known yet, returning the
    /// slot's index so it can be patched once the target is.
    fn jump_placeholder(&mut self) -> usize {
        let index = self.instructions.len();
        self.emit(Instruction::Noop);
        index
    }

    /// The address the next-emitted instruction will land at.
    fn label(&self) -> usize {
        self.instructions.len()
    }

    fn patch_jump(
        &mut self,
        placeholder: usize,
        target: usize,
        make_jump: impl FnOnce(i32) -> Instruction,
    ) -> Result<(), CompileError> {
        let target_i32: i32 =
            target.try_into().map_err(|_| CompileError::JumpTooFar { target })?;
        self.instructions[placeholder] = make_jump(target_i32);
        Ok(())
    }

    fn compile_expr(&mut self, expr: &Expr, use_value: bool) -> Result<(), CompileError> {
        match expr {
            Expr::Constant(v) => {
                if use_value {
                    self.emit(Instruction::Push(*v));
                }
            }

            Expr::Sequence(children) => {
                if children.is_empty() {
                    if use_value {
                        self.emit(Instruction::Push(0.0));
                    }
                    return Ok(());
                }
                let (last, init) = children.split_last().expect("checked non-empty above");
                for child in init {
                    self.compile_expr(child, false)?;
                }
                self.compile_expr(last, use_value)?;
            }

            Expr::If(cond, then_branch, else_branch) => {
                self.compile_expr(cond, true)?;
                let else_jump = self.jump_placeholder();
                self.compile_expr(then_branch, use_value)?;
                let end_jump = self.jump_placeholder();
                let else_label = self.label();
                self.patch_jump(else_jump, else_label, Instruction::PopJmpIfFalse)?;
                self.compile_expr(else_branch, use_value)?;
                let end_label = self.label();
                self.patch_jump(end_jump, end_label, Instruction::Jmp)?;
            }

            Expr::While(cond, body) => {
                let loop_head = self.label();
                self.compile_expr(cond, true)?;
                let exit_jump = self.jump_placeholder();
                self.compile_expr(body, false)?;
                self.emit(Instruction::Jmp(loop_head as i32));
                let exit_label = self.label();
                self.patch_jump(exit_jump, exit_label, Instruction::PopJmpIfFalse)?;
                // Matches the reference bytecode exactly: no trailing PUSH 0
                // even when use_value is true (see DESIGN.md).
            }

            Expr::Load(index) => {
                if !use_value {
                    return Ok(());
                }
                if let Some(k) = index.as_constant() {
                    self.emit(Instruction::Get(k as i32));
                } else {
                    self.compile_expr(index, true)?;
                    self.emit(Instruction::GetIndirect);
                }
            }

            Expr::Store(index, value) => {
                // Always compiled for its side effect, regardless of use_value.
                // The reference compiler never leaves the stored value on the
                // stack (see DESIGN.md).
                if let Some(k) = index.as_constant() {
                    self.compile_expr(value, true)?;
                    self.emit(Instruction::Set(k as i32));
                } else {
                    self.compile_expr(index, true)?;
                    self.compile_expr(value, true)?;
                    self.emit(Instruction::SetIndirect);
                }
            }

            Expr::Binary(op, left, right) => {
                self.compile_expr(left, use_value)?;
                self.compile_expr(right, use_value)?;
                if use_value {
                    self.emit(binop_instruction(*op));
                }
            }

            Expr::Unary(op, operand) => {
                self.compile_expr(operand, use_value)?;
                if use_value {
                    self.emit(unop_instruction(*op));
                }
            }
        }
        Ok(())
    }
}

fn binop_instruction(op: BinOp) -> Instruction {
    match op {
        BinOp::Add => Instruction::Add,
        BinOp::Sub => Instruction::Sub,
        BinOp::Mul => Instruction::Mul,
        BinOp::Div => Instruction::Div,
        BinOp::Mod => Instruction::Mod,
        BinOp::Eq => Instruction::Eq,
        BinOp::Neq => Instruction::Neq,
        BinOp::Lt => Instruction::Lt,
        BinOp::Gt => Instruction::Gt,
        BinOp::Lte => Instruction::Lte,
        BinOp::Gte => Instruction::Gte,
        BinOp::And => Instruction::And,
        BinOp::Or => Instruction::Or,
    }
}

fn unop_instruction(op: UnOp) -> Instruction {
    match op {
        UnOp::Not => Instruction::Not,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::expr::{binary, constant, if_, load, sequence, store, unary, while_, BinOp, UnOp};
    use crate::vm::run;

    #[test]
    fn constant_only_compiles_to_a_single_push() {
        let code = compile(&constant(42));
        assert_eq!(code.len(), 1);
        assert_eq!(code.instructions[0], Instruction::Push(42.0));
    }

    #[test]
    fn empty_sequence_in_value_position_pushes_zero() {
        let code = compile(&sequence([]));
        assert_eq!(code.instructions, vec![Instruction::Push(0.0)]);
    }

    #[test]
    fn memory_round_trip_uses_direct_addressing() {
        let mut ctx = Context::new(16);
        let tree = sequence([store(constant(5), constant(7)), load(constant(5))]);
        let code = compile(&tree);
        assert_eq!(run(&code, &mut ctx), Ok(7.0));
        assert!(code.instructions.contains(&Instruction::Set(5)));
        assert!(code.instructions.contains(&Instruction::Get(5)));
    }

    #[test]
    fn indirect_addressing_for_non_constant_index() {
        let mut ctx = Context::new(16);
        ctx.set_at(3, 9.0);
        let tree = load(load(constant(0)));
        ctx.set_at(0, 3.0);
        let code = compile(&tree);
        assert!(code.instructions.contains(&Instruction::GetIndirect));
        assert_eq!(run(&code, &mut ctx), Ok(9.0));
    }

    #[test]
    fn conditional_branching_matches_tree_walker() {
        let mut ctx = Context::new(16);
        let tree = if_(
            binary(BinOp::Eq, constant(1), constant(1)),
            constant(3),
            constant(4),
        );
        assert_eq!(run(&compile(&tree), &mut ctx), Ok(3.0));

        let tree = if_(
            binary(BinOp::Eq, constant(1), constant(2)),
            constant(3),
            constant(4),
        );
        assert_eq!(run(&compile(&tree), &mut ctx), Ok(4.0));
    }

    #[test]
    fn while_loop_counts_down() {
        let mut ctx = Context::new(16);
        ctx.set(0.0, 5.0);
        let tree = while_(
            load(constant(0)),
            store(constant(0), binary(BinOp::Sub, load(constant(0)), constant(1))),
        );
        assert_eq!(run(&compile(&tree), &mut ctx), Ok(0.0));
        assert_eq!(ctx.get(0.0), 0.0);
    }

    #[test]
    fn store_leaves_nothing_on_stack_even_in_value_position() {
        let mut ctx = Context::new(16);
        // Top-level compile() always uses use_value=true, yet a bare Store
        // still ends the program with an empty stack (the reference
        // compiler never leaves the stored value behind).
        let code = compile(&store(constant(0), constant(9.0)));
        assert_eq!(code.instructions.last(), Some(&Instruction::Set(0)));
        assert_eq!(run(&code, &mut ctx), Ok(0.0));
        assert_eq!(ctx.get(0.0), 9.0);
    }

    #[test]
    fn not_operator() {
        let mut ctx = Context::new(16);
        assert_eq!(run(&compile(&unary(UnOp::Not, constant(0))), &mut ctx), Ok(1.0));
    }

    #[test]
    fn and_or_do_not_short_circuit() {
        let mut ctx = Context::new(16);
        let tree = sequence([
            binary(
                BinOp::Or,
                store(constant(0), constant(1)),
                store(constant(1), constant(1)),
            ),
            load(constant(1)),
        ]);
        assert_eq!(run(&compile(&tree), &mut ctx), Ok(1.0));
    }
}
