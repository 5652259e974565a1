pub mod ast;
pub mod cli;
pub mod data;
pub mod env;
pub mod eval;
pub mod parser;
pub mod promise;
pub mod value;

// Re-export main types
pub use ast::{BinaryOp, Expr, UnaryOp};
pub use data::DataContext;
pub use env::{Env, EnvRef};
pub use eval::{eval2, EvalError, EvalInput};
pub use parser::{parse_expr, ParseError};
pub use promise::{explicit, explicit_src, is_explicit_promise, ExplicitPromise};
pub use value::Value;
