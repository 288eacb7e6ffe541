//! Core evaluation logic: recursive descent directly over the tree.

use crate::context::Context;
use crate::evaluator::EvalError;
use crate::expr::{BinOp, Expr, UnOp};

/// Options for configuring the evaluator. Mirrors the closure backend's
/// `closure::LowerOptions` - both backends recurse on the native call stack
/// and need the same guard.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Maximum evaluation recursion depth.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// Evaluate `root` against `ctx`, using the default depth guard.
///
/// This is the spec's `Evaluate(root, ctx) -> double` entry point. It never
/// returns an error for any tree within the default depth budget: division
/// and modulo by zero flow through as IEEE-754 `+-inf`/`NaN` rather than
/// raising, and out-of-range memory indices are the caller's responsibility
/// (see [`Context::get`]).
pub fn evaluate(root: &Expr, ctx: &mut Context) -> f64 {
    evaluate_with_options(root, ctx, EvalOptions::default())
        .expect("default max_depth exceeded - use evaluate_with_options for deeper trees")
}

/// Evaluate `root` against `ctx`, failing gracefully if recursion exceeds
/// `options.max_depth` instead of overflowing the native call stack.
pub fn evaluate_with_options(
    root: &Expr,
    ctx: &mut Context,
    options: EvalOptions,
) -> Result<f64, EvalError> {
    Evaluator { ctx, depth: 0, max_depth: options.max_depth }.eval(root)
}

struct Evaluator<'ctx> {
    ctx: &'ctx mut Context,
    depth: usize,
    max_depth: usize,
}

impl<'ctx> Evaluator<'ctx> {
    fn eval(&mut self, expr: &Expr) -> Result<f64, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthExceeded {
                depth: self.depth,
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = self.eval_inner(expr);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Constant(v) => Ok(*v),

            Expr::Sequence(children) => {
                let mut last = 0.0;
                for child in children {
                    last = self.eval(child)?;
                }
                Ok(last)
            }

            Expr::If(cond, then_branch, else_branch) => {
                if self.eval(cond)? != 0.0 {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }

            Expr::While(cond, body) => {
                while self.eval(cond)? != 0.0 {
                    self.eval(body)?;
                }
                Ok(0.0)
            }

            Expr::Load(index) => {
                let index = self.eval(index)?;
                Ok(self.ctx.get(index))
            }

            Expr::Store(index, value) => {
                let index = self.eval(index)?;
                let value = self.eval(value)?;
                Ok(self.ctx.set(index, value))
            }

            Expr::Binary(op, left, right) => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                Ok(eval_binary(*op, l, r))
            }

            Expr::Unary(op, operand) => {
                let v = self.eval(operand)?;
                Ok(eval_unary(*op, v))
            }
        }
    }
}

/// Evaluate a binary operator over two already-evaluated doubles. Shared by
/// the evaluator and the closure backend so the arithmetic itself has one
/// definition.
pub(crate) fn eval_binary(op: BinOp, l: f64, r: f64) -> f64 {
    match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div => l / r,
        BinOp::Mod => l % r,
        BinOp::Eq => bool_to_f64(l == r),
        BinOp::Neq => bool_to_f64(l != r),
        BinOp::Lt => bool_to_f64(l < r),
        BinOp::Gt => bool_to_f64(l > r),
        BinOp::Lte => bool_to_f64(l <= r),
        BinOp::Gte => bool_to_f64(l >= r),
        BinOp::And => bool_to_f64(l != 0.0 && r != 0.0),
        BinOp::Or => bool_to_f64(l != 0.0 || r != 0.0),
    }
}

pub(crate) fn eval_unary(op: UnOp, v: f64) -> f64 {
    match op {
        UnOp::Not => bool_to_f64(v == 0.0),
    }
}

pub(crate) fn bool_to_f64(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
