//! Runtime value types

use std::rc::Rc;

use serde_json::Value as JsonValue;

use crate::env::EnvRef;
use crate::promise::ExplicitPromise;

/// Runtime value type
///
/// Scalars and vectors are separate variants; a scalar behaves as a
/// length-one operand wherever broadcasting applies. `Formula` and `Env`
/// are the two non-data variants: a formula is promise-shaped (expression
/// plus captured environment) and an environment is a first-class scope
/// handle.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    BoolVec(Vec<bool>),
    NumVec(Vec<f64>),
    StrVec(Vec<String>),
    List(Vec<Value>),
    Formula(Rc<ExplicitPromise>),
    Env(EnvRef),
}

impl Value {
    /// Check if value is truthy (for conditionals)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            _ => true,
        }
    }

    /// Plain data: anything that is not a formula or an environment
    pub fn is_data(&self) -> bool {
        !matches!(self, Value::Formula(_) | Value::Env(_))
    }

    /// Element count; scalars have length 1
    pub fn len(&self) -> usize {
        match self {
            Value::BoolVec(v) => v.len(),
            Value::NumVec(v) => v.len(),
            Value::StrVec(v) => v.len(),
            Value::List(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "logical",
            Value::Num(_) => "numeric",
            Value::Str(_) => "character",
            Value::BoolVec(_) => "logical vector",
            Value::NumVec(_) => "numeric vector",
            Value::StrVec(_) => "character vector",
            Value::List(_) => "list",
            Value::Formula(_) => "formula",
            Value::Env(_) => "environment",
        }
    }

    /// Convert a JSON value into a runtime value
    ///
    /// Homogeneous arrays of booleans, numbers, or strings become typed
    /// vectors; anything else array-shaped becomes a list. JSON objects have
    /// no runtime counterpart and are rejected.
    pub fn from_json(json: &JsonValue) -> Result<Value, String> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => n
                .as_f64()
                .map(Value::Num)
                .ok_or_else(|| format!("number out of range: {}", n)),
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            JsonValue::Array(items) => {
                if !items.is_empty() && items.iter().all(|v| v.is_boolean()) {
                    return Ok(Value::BoolVec(
                        items.iter().map(|v| v.as_bool().unwrap_or(false)).collect(),
                    ));
                }
                if !items.is_empty() && items.iter().all(|v| v.is_number()) {
                    return Ok(Value::NumVec(
                        items.iter().filter_map(|v| v.as_f64()).collect(),
                    ));
                }
                if !items.is_empty() && items.iter().all(|v| v.is_string()) {
                    return Ok(Value::StrVec(
                        items
                            .iter()
                            .map(|v| v.as_str().unwrap_or_default().to_string())
                            .collect(),
                    ));
                }
                let converted: Result<Vec<Value>, String> =
                    items.iter().map(Value::from_json).collect();
                Ok(Value::List(converted?))
            }
            JsonValue::Object(_) => Err("JSON objects have no runtime value equivalent".to_string()),
        }
    }

    /// Convert a runtime value to JSON for display
    ///
    /// Formulas render as their deparsed source; environments as an opaque
    /// marker. Non-finite numbers become JSON null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Num(n) => JsonValue::from(*n),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::BoolVec(v) => JsonValue::Array(v.iter().map(|b| JsonValue::Bool(*b)).collect()),
            Value::NumVec(v) => JsonValue::Array(v.iter().map(|n| JsonValue::from(*n)).collect()),
            Value::StrVec(v) => {
                JsonValue::Array(v.iter().map(|s| JsonValue::String(s.clone())).collect())
            }
            Value::List(v) => JsonValue::Array(v.iter().map(Value::to_json).collect()),
            Value::Formula(p) => JsonValue::String(format!("~{}", p.expr())),
            Value::Env(_) => JsonValue::String("<environment>".to_string()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::BoolVec(a), Value::BoolVec(b)) => a == b,
            (Value::NumVec(a), Value::NumVec(b)) => a == b,
            (Value::StrVec(a), Value::StrVec(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Formula(a), Value::Formula(b)) => a == b,
            // Environments compare by identity, not contents
            (Value::Env(a), Value::Env(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
