//! First-class environments
//!
//! An environment is a mutable set of name bindings plus an optional parent.
//! Environments are shared by handle (`EnvRef`): a promise holds a clone of
//! the handle to its defining scope, so the scope stays alive as long as any
//! promise that might still be evaluated against it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// Shared-ownership handle to an environment
pub type EnvRef = Rc<Env>;

/// A variable-binding scope with an optional parent scope
#[derive(Debug)]
pub struct Env {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<EnvRef>,
}

impl Env {
    /// Create a new top-level environment with no parent
    pub fn root() -> EnvRef {
        Rc::new(Env {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Create a new environment whose name lookups fall back to `parent`
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(Env {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Bind `name` to `value` in this environment, replacing any existing binding
    pub fn bind(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Look up `name` here, then in each parent in turn
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// The enclosing environment, if any
    pub fn parent(&self) -> Option<&EnvRef> {
        self.parent.as_ref()
    }
}
