//! Interpreter session state.
//!
//! - `context`: per-session bindings, index origin and registry handle
//! - `environment`: scope stack
//! - `registry`: primitive handles, operators and documentation

mod context;
mod environment;
mod registry;

pub use context::Context;
pub use environment::{Environment, Scope, ScopeId};
pub use registry::{Arity, FunctionHandle, HandleFn, Operator, Primitive, Registry};
