//! The expression tree and the builder sugar used to construct it.
//!
//! Builders are sugar only: their sole contract is producing valid trees.
//! They do no validation beyond what the type system already gives us.

/// Binary operators. Comparisons yield exactly `1.0` or `0.0`; `and`/`or`
/// evaluate both operands unconditionally (no short-circuit) in all three
/// backends, matching spec §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
}

/// An expression node. Children are owned by their parent; trees are
/// acyclic and read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    Sequence(Vec<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    While(Box<Expr>, Box<Expr>),
    Load(Box<Expr>),
    Store(Box<Expr>, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Unary(UnOp, Box<Expr>),
}

impl Expr {
    /// `true` if this node is a `Constant`, used by the compiler to decide
    /// between direct (`GET`/`SET`) and indirect (`GET_INDIRECT`/
    /// `SET_INDIRECT`) memory addressing.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Constant(v) => Some(*v),
            _ => None,
        }
    }
}

/// Build a `Constant` node from any value convertible to `f64` (so both
/// integer and float literals can be used directly, per spec §6:
/// "Integer/double literal helpers wrap a number in a Constant").
pub fn constant(v: impl Into<f64>) -> Expr {
    Expr::Constant(v.into())
}

pub fn sequence(children: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Sequence(children.into_iter().collect())
}

pub fn if_(cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::If(Box::new(cond), Box::new(then_branch), Box::new(else_branch))
}

pub fn while_(cond: Expr, body: Expr) -> Expr {
    Expr::While(Box::new(cond), Box::new(body))
}

pub fn load(index: Expr) -> Expr {
    Expr::Load(Box::new(index))
}

pub fn store(index: Expr, value: Expr) -> Expr {
    Expr::Store(Box::new(index), Box::new(value))
}

pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary(op, Box::new(left), Box::new(right))
}

pub fn unary(op: UnOp, operand: Expr) -> Expr {
    Expr::Unary(op, Box::new(operand))
}
