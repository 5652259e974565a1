//! Explicit promises
//!
//! An explicit promise pairs an unevaluated expression with the environment
//! it should later be evaluated in. It is the library's reified version of a
//! lazy argument: instead of relying on implicit caller-frame capture, the
//! call site quotes the expression and names the scope, and the resulting
//! value can be stored, passed around, and evaluated any number of times.

use std::rc::Rc;

use crate::ast::Expr;
use crate::env::EnvRef;
use crate::parser::{parse_expr, ParseResult};
use crate::value::Value;

/// An unevaluated expression bound to its capturing environment
///
/// Both fields are immutable after construction. The environment handle is
/// shared, not owned: many promises may reference the same scope.
#[derive(Debug, Clone)]
pub struct ExplicitPromise {
    expr: Expr,
    env: EnvRef,
}

impl ExplicitPromise {
    pub fn new(expr: Expr, env: EnvRef) -> Self {
        ExplicitPromise { expr, env }
    }

    /// The captured, unevaluated expression
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The environment captured at construction
    pub fn env(&self) -> &EnvRef {
        &self.env
    }

    /// Wrap this promise as a formula value
    pub fn into_value(self) -> Value {
        Value::Formula(Rc::new(self))
    }
}

impl PartialEq for ExplicitPromise {
    fn eq(&self, other: &Self) -> bool {
        // Environments compare by identity
        self.expr == other.expr && Rc::ptr_eq(&self.env, &other.env)
    }
}

/// Capture `expr` together with `env` as an explicit promise
///
/// The expression is taken as written and never evaluated here; `env` is the
/// scope its names will resolve against when the promise is evaluated later.
pub fn explicit(expr: Expr, env: &EnvRef) -> ExplicitPromise {
    ExplicitPromise::new(expr, Rc::clone(env))
}

/// Parse `source` and capture the result together with `env`
pub fn explicit_src(source: &str, env: &EnvRef) -> ParseResult<ExplicitPromise> {
    Ok(explicit(parse_expr(source)?, env))
}

/// Check whether a value carries the formula shape (expression plus
/// environment), regardless of how it was constructed
pub fn is_explicit_promise(value: &Value) -> bool {
    matches!(value, Value::Formula(_))
}
