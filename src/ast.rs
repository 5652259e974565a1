//! Abstract Syntax Tree node types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    LitNull,
    LitBool { v: bool },
    LitNum { v: f64 },
    LitStr { v: String },
    Ident { name: String },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    /// One-sided formula `~expr` - quotes its body instead of evaluating it
    Formula { body: Box<Expr> },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::LitNull => write!(f, "null"),
            Expr::LitBool { v } => write!(f, "{}", v),
            Expr::LitNum { v } => write!(f, "{}", v),
            Expr::LitStr { v } => write!(f, "\"{}\"", v),
            Expr::Ident { name } => write!(f, "{}", name),
            Expr::Unary { op, operand } => {
                write!(f, "{}", op.symbol())?;
                fmt_operand(f, operand)
            }
            Expr::Binary { op, left, right } => {
                fmt_operand(f, left)?;
                write!(f, " {} ", op.symbol())?;
                fmt_operand(f, right)
            }
            Expr::Formula { body } => write!(f, "~{}", body),
        }
    }
}

/// Parenthesize nested compound expressions so the output re-parses unambiguously
fn fmt_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Binary { .. } | Expr::Formula { .. } => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}
