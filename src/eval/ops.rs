//! Operator semantics with scalar/vector broadcasting
//!
//! Arithmetic and comparison broadcast: scalar op scalar gives a scalar,
//! vector op scalar (either side) maps over the vector, and vector op vector
//! requires equal lengths. There is no partial recycling.

use crate::ast::{BinaryOp, UnaryOp};
use crate::value::Value;

use super::{EvalError, EvalResult};

pub fn apply_unary(op: UnaryOp, value: Value) -> EvalResult {
    match (op, value) {
        (UnaryOp::Neg, Value::Num(n)) => Ok(Value::Num(-n)),
        (UnaryOp::Neg, Value::NumVec(ns)) => {
            Ok(Value::NumVec(ns.into_iter().map(|n| -n).collect()))
        }
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Not, Value::BoolVec(bs)) => {
            Ok(Value::BoolVec(bs.into_iter().map(|b| !b).collect()))
        }
        (op, value) => Err(EvalError::Type(format!(
            "unary '{}' is not defined for {}",
            op.symbol(),
            value.kind()
        ))),
    }
}

pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            arith(op, left, right)
        }
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => compare(op, left, right),
        BinaryOp::Eq => equality(false, left, right),
        BinaryOp::Ne => equality(true, left, right),
        BinaryOp::And | BinaryOp::Or => logical(op, left, right),
    }
}

/* ===================== Arithmetic ===================== */

fn arith(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    // Division by zero follows f64 semantics (inf/nan), it is not an error
    let f: fn(f64, f64) -> f64 = match op {
        BinaryOp::Add => |l, r| l + r,
        BinaryOp::Sub => |l, r| l - r,
        BinaryOp::Mul => |l, r| l * r,
        BinaryOp::Div => |l, r| l / r,
        BinaryOp::Rem => |l, r| l % r,
        _ => {
            return Err(EvalError::Type(format!(
                "'{}' is not an arithmetic operator",
                op.symbol()
            )))
        }
    };

    match (left, right) {
        (Value::Num(l), Value::Num(r)) => Ok(Value::Num(f(l, r))),
        (Value::NumVec(ls), Value::Num(r)) => {
            Ok(Value::NumVec(ls.into_iter().map(|l| f(l, r)).collect()))
        }
        (Value::Num(l), Value::NumVec(rs)) => {
            Ok(Value::NumVec(rs.into_iter().map(|r| f(l, r)).collect()))
        }
        (Value::NumVec(ls), Value::NumVec(rs)) => {
            check_lengths(ls.len(), rs.len())?;
            Ok(Value::NumVec(
                ls.into_iter().zip(rs).map(|(l, r)| f(l, r)).collect(),
            ))
        }
        (l, r) => Err(EvalError::Type(format!(
            "'{}' is not defined for {} and {}",
            op.symbol(),
            l.kind(),
            r.kind()
        ))),
    }
}

/* ===================== Comparison ===================== */

fn compare(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    // NaN comparisons are false in every direction, as with f64 operators
    let num_cmp: fn(f64, f64) -> bool = match op {
        BinaryOp::Lt => |l, r| l < r,
        BinaryOp::Gt => |l, r| l > r,
        BinaryOp::Le => |l, r| l <= r,
        BinaryOp::Ge => |l, r| l >= r,
        _ => {
            return Err(EvalError::Type(format!(
                "'{}' is not a comparison operator",
                op.symbol()
            )))
        }
    };
    let str_cmp: fn(&str, &str) -> bool = match op {
        BinaryOp::Lt => |l: &str, r: &str| l < r,
        BinaryOp::Gt => |l: &str, r: &str| l > r,
        BinaryOp::Le => |l: &str, r: &str| l <= r,
        _ => |l: &str, r: &str| l >= r,
    };

    match (left, right) {
        (Value::Num(l), Value::Num(r)) => Ok(Value::Bool(num_cmp(l, r))),
        (Value::NumVec(ls), Value::Num(r)) => Ok(Value::BoolVec(
            ls.into_iter().map(|l| num_cmp(l, r)).collect(),
        )),
        (Value::Num(l), Value::NumVec(rs)) => Ok(Value::BoolVec(
            rs.into_iter().map(|r| num_cmp(l, r)).collect(),
        )),
        (Value::NumVec(ls), Value::NumVec(rs)) => {
            check_lengths(ls.len(), rs.len())?;
            Ok(Value::BoolVec(
                ls.into_iter().zip(rs).map(|(l, r)| num_cmp(l, r)).collect(),
            ))
        }
        (Value::Str(l), Value::Str(r)) => Ok(Value::Bool(str_cmp(&l, &r))),
        (Value::StrVec(ls), Value::Str(r)) => Ok(Value::BoolVec(
            ls.iter().map(|l| str_cmp(l, &r)).collect(),
        )),
        (Value::Str(l), Value::StrVec(rs)) => Ok(Value::BoolVec(
            rs.iter().map(|r| str_cmp(&l, r)).collect(),
        )),
        (Value::StrVec(ls), Value::StrVec(rs)) => {
            check_lengths(ls.len(), rs.len())?;
            Ok(Value::BoolVec(
                ls.iter().zip(rs.iter()).map(|(l, r)| str_cmp(l, r)).collect(),
            ))
        }
        (l, r) => Err(EvalError::Type(format!(
            "'{}' is not defined for {} and {}",
            op.symbol(),
            l.kind(),
            r.kind()
        ))),
    }
}

/* ===================== Equality ===================== */

fn equality(negate: bool, left: Value, right: Value) -> EvalResult {
    let result = match (&left, &right) {
        (Value::NumVec(ls), Value::Num(r)) => Value::BoolVec(ls.iter().map(|l| l == r).collect()),
        (Value::Num(l), Value::NumVec(rs)) => Value::BoolVec(rs.iter().map(|r| l == r).collect()),
        (Value::NumVec(ls), Value::NumVec(rs)) => {
            check_lengths(ls.len(), rs.len())?;
            Value::BoolVec(ls.iter().zip(rs.iter()).map(|(l, r)| l == r).collect())
        }
        (Value::StrVec(ls), Value::Str(r)) => Value::BoolVec(ls.iter().map(|l| l == r).collect()),
        (Value::Str(l), Value::StrVec(rs)) => Value::BoolVec(rs.iter().map(|r| l == r).collect()),
        (Value::StrVec(ls), Value::StrVec(rs)) => {
            check_lengths(ls.len(), rs.len())?;
            Value::BoolVec(ls.iter().zip(rs.iter()).map(|(l, r)| l == r).collect())
        }
        (Value::BoolVec(ls), Value::Bool(r)) => Value::BoolVec(ls.iter().map(|l| l == r).collect()),
        (Value::Bool(l), Value::BoolVec(rs)) => Value::BoolVec(rs.iter().map(|r| l == r).collect()),
        (Value::BoolVec(ls), Value::BoolVec(rs)) => {
            check_lengths(ls.len(), rs.len())?;
            Value::BoolVec(ls.iter().zip(rs.iter()).map(|(l, r)| l == r).collect())
        }
        // Scalars, lists, and mismatched kinds: whole-value equality
        _ => Value::Bool(left == right),
    };

    if negate {
        match result {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            Value::BoolVec(bs) => Ok(Value::BoolVec(bs.into_iter().map(|b| !b).collect())),
            other => Ok(other),
        }
    } else {
        Ok(result)
    }
}

/* ===================== Logical ===================== */

/// Non-short-circuit combination for already-evaluated operands; the
/// evaluator handles short-circuiting before operand evaluation
fn logical(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match (op, left, right) {
        (BinaryOp::And, Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(l && r)),
        (BinaryOp::Or, Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(l || r)),
        (op, l, r) => Err(EvalError::Type(format!(
            "'{}' requires scalar logical operands, got {} and {}",
            op.symbol(),
            l.kind(),
            r.kind()
        ))),
    }
}

fn check_lengths(left: usize, right: usize) -> Result<(), EvalError> {
    if left == right {
        Ok(())
    } else {
        Err(EvalError::LengthMismatch { left, right })
    }
}
