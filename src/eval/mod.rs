//! Deferred evaluation
//!
//! [`eval2`] is the single entry point: it takes a literal, a bare
//! expression, or an explicit promise, and evaluates it against an optional
//! data context with an environment as fallback scope. Names found in the
//! data context mask names in the environment. A promise carries its own
//! environment and ignores the one supplied by the caller.

pub mod ops;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::ast::{BinaryOp, Expr};
use crate::data::DataContext;
use crate::env::{Env, EnvRef};
use crate::promise::ExplicitPromise;
use crate::value::Value;

/* ===================== Error Types ===================== */

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    /// The input was neither plain data nor an expression after unwrapping
    #[error("invalid evaluation target: {0}")]
    Precondition(String),
    /// A name was bound in neither the data context nor the environment
    #[error("object '{name}' not found")]
    NameResolution { name: String },
    /// An operator was applied to operands it is not defined for
    #[error("type error: {0}")]
    Type(String),
    /// Two vectors of different lengths met in a broadcast operation
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type EvalResult = Result<Value, EvalError>;

/* ===================== Evaluation Input ===================== */

/// What `eval2` accepts: a value, an unevaluated expression, or a promise
#[derive(Debug, Clone, PartialEq)]
pub enum EvalInput {
    Literal(Value),
    Expression(Expr),
    Promise(ExplicitPromise),
}

impl From<Value> for EvalInput {
    fn from(value: Value) -> Self {
        match value {
            // Formula-shaped values are interchangeable with promises
            Value::Formula(p) => EvalInput::Promise((*p).clone()),
            other => EvalInput::Literal(other),
        }
    }
}

impl From<Expr> for EvalInput {
    fn from(expr: Expr) -> Self {
        EvalInput::Expression(expr)
    }
}

impl From<ExplicitPromise> for EvalInput {
    fn from(promise: ExplicitPromise) -> Self {
        EvalInput::Promise(promise)
    }
}

/* ===================== Public API ===================== */

/// Evaluate `x` against an optional data context and fallback environment
///
/// Dispatch order:
/// 1. A promise (or a literal holding a formula value) discards the supplied
///    environment and evaluates its stored expression in its stored one.
/// 2. A literal holding plain data returns unchanged.
/// 3. A literal holding a non-data value (an environment handle) is a
///    precondition failure.
/// 4. An expression evaluates with names resolved against `data` first,
///    then the environment chain. With `env = None` an empty root
///    environment is used, so unbound names fail with `NameResolution`.
///
/// Errors raised while evaluating the expression propagate unmodified.
pub fn eval2(
    x: impl Into<EvalInput>,
    data: Option<&DataContext>,
    env: Option<&EnvRef>,
) -> EvalResult {
    let (expr, env) = match x.into() {
        EvalInput::Promise(promise) => {
            // The promise's captured environment wins over the caller's
            debug!(expr = %promise.expr(), "evaluating explicit promise");
            (promise.expr().clone(), Rc::clone(promise.env()))
        }
        EvalInput::Literal(Value::Formula(promise)) => {
            debug!(expr = %promise.expr(), "evaluating formula value");
            (promise.expr().clone(), Rc::clone(promise.env()))
        }
        EvalInput::Literal(value) if value.is_data() => return Ok(value),
        EvalInput::Literal(value) => {
            return Err(EvalError::Precondition(format!(
                "cannot evaluate a value of kind {}",
                value.kind()
            )))
        }
        EvalInput::Expression(expr) => {
            let env = env.map(Rc::clone).unwrap_or_else(Env::root);
            (expr, env)
        }
    };

    eval_expr(&expr, data, &env)
}

/* ===================== Expression Evaluator ===================== */

/// Evaluate an expression with data-then-environment name resolution
pub(crate) fn eval_expr(expr: &Expr, data: Option<&DataContext>, env: &EnvRef) -> EvalResult {
    match expr {
        Expr::LitNull => Ok(Value::Null),
        Expr::LitBool { v } => Ok(Value::Bool(*v)),
        Expr::LitNum { v } => Ok(Value::Num(*v)),
        Expr::LitStr { v } => Ok(Value::Str(v.clone())),

        Expr::Ident { name } => lookup_name(name, data, env),

        Expr::Unary { op, operand } => {
            let value = eval_expr(operand, data, env)?;
            ops::apply_unary(*op, value)
        }

        // Short-circuit logical operators require scalar booleans
        Expr::Binary {
            op: op @ (BinaryOp::And | BinaryOp::Or),
            left,
            right,
        } => {
            let left = scalar_bool(*op, eval_expr(left, data, env)?)?;
            match op {
                BinaryOp::And if !left => Ok(Value::Bool(false)),
                BinaryOp::Or if left => Ok(Value::Bool(true)),
                _ => {
                    let right = scalar_bool(*op, eval_expr(right, data, env)?)?;
                    Ok(Value::Bool(right))
                }
            }
        }

        Expr::Binary { op, left, right } => {
            let left = eval_expr(left, data, env)?;
            let right = eval_expr(right, data, env)?;
            ops::apply_binary(*op, left, right)
        }

        // `~expr` captures the fallback environment, never the data mask
        Expr::Formula { body } => {
            Ok(ExplicitPromise::new((**body).clone(), Rc::clone(env)).into_value())
        }
    }
}

fn lookup_name(name: &str, data: Option<&DataContext>, env: &EnvRef) -> EvalResult {
    if let Some(data) = data {
        if let Some(value) = data.get(name) {
            return Ok(value.clone());
        }
    }
    env.lookup(name).ok_or_else(|| EvalError::NameResolution {
        name: name.to_string(),
    })
}

fn scalar_bool(op: BinaryOp, value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::Type(format!(
            "'{}' requires scalar logical operands, got {}",
            op.symbol(),
            other.kind()
        ))),
    }
}
