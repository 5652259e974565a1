//! Evaluation tests
//!
//! One file per concern, mirroring the eval2 dispatch order: literals,
//! environment resolution, data masking, promises, errors.

mod literal_tests;

use std::collections::HashMap;

use crate::env::{Env, EnvRef};
use crate::value::Value;

/// Helper: build a root environment holding the given bindings
fn env_with(bindings: HashMap<String, Value>) -> EnvRef {
    let env = Env::root();
    for (name, value) in bindings {
        env.bind(name, value);
    }
    env
}
