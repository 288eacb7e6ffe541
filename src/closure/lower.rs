//! Closure lowering: transforms the tree into a composed, pre-resolved
//! callable whose inner operations are looked up once at construction time.

use crate::context::Context;
use crate::evaluator::{eval_binary, eval_unary};
use crate::expr::Expr;

/// A lowered, directly-callable program. Variant dispatch happened once, at
/// [`lower`] time; invoking the closure does no tree traversal, only calls.
pub struct Closure {
    f: Box<dyn Fn(&mut Context) -> f64>,
}

impl Closure {
    /// Run the lowered program against `ctx`.
    pub fn call(&self, ctx: &mut Context) -> f64 {
        (self.f)(ctx)
    }
}

/// Lower `root` into a [`Closure`]. Lowering is a one-time recursive pass;
/// the result, when invoked, produces the same value as
/// [`crate::evaluator::evaluate`] on the same [`Context`].
pub fn lower(root: &Expr) -> Closure {
    Closure { f: lower_fn(root) }
}

fn lower_fn(expr: &Expr) -> Box<dyn Fn(&mut Context) -> f64> {
    match expr {
        Expr::Constant(v) => {
            let v = *v;
            Box::new(move |_ctx| v)
        }

        Expr::Sequence(children) => {
            let children: Vec<_> = children.iter().map(lower_fn).collect();
            Box::new(move |ctx| {
                let mut last = 0.0;
                for child in &children {
                    last = child(ctx);
                }
                last
            })
        }

        Expr::If(cond, then_branch, else_branch) => {
            let cond = lower_fn(cond);
            let then_branch = lower_fn(then_branch);
            let else_branch = lower_fn(else_branch);
            Box::new(move |ctx| {
                if cond(ctx) != 0.0 {
                    then_branch(ctx)
                } else {
                    else_branch(ctx)
                }
            })
        }

        Expr::While(cond, body) => {
            let cond = lower_fn(cond);
            let body = lower_fn(body);
            Box::new(move |ctx| {
                while cond(ctx) != 0.0 {
                    body(ctx);
                }
                0.0
            })
        }

        Expr::Load(index) => {
            let index = lower_fn(index);
            Box::new(move |ctx| {
                let index = index(ctx);
                ctx.get(index)
            })
        }

        Expr::Store(index, value) => {
            let index = lower_fn(index);
            let value = lower_fn(value);
            Box::new(move |ctx| {
                let index = index(ctx);
                let value = value(ctx);
                ctx.set(index, value)
            })
        }

        Expr::Binary(op, left, right) => {
            let op = *op;
            let left = lower_fn(left);
            let right = lower_fn(right);
            Box::new(move |ctx| {
                let l = left(ctx);
                let r = right(ctx);
                eval_binary(op, l, r)
            })
        }

        Expr::Unary(op, operand) => {
            let op = *op;
            let operand = lower_fn(operand);
            Box::new(move |ctx| {
                let v = operand(ctx);
                eval_unary(op, v)
            })
        }
    }
}
