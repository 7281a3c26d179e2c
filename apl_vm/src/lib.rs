//! Evaluation core of an APL-family array language.
//!
//! The crate provides the value model, the assignment engine, the reverse
//! and rotate primitives and the interpreter context they run against.
//! Parsing is left to the host, which hands the evaluator a [`Program`].
//!
//! ```
//! use std::rc::Rc;
//! use apl_vm::{primitives, Context, Expr, FunctionExpr, Program, Registry, Value};
//! use apl_vm::vm::value::ArrayValue;
//!
//! let mut registry = Registry::new();
//! primitives::register(&mut registry);
//! let mut ctx = Context::new(Rc::new(registry));
//!
//! let program = Program::new(vec![Expr::Monadic {
//!     func: FunctionExpr::primitive("⌽"),
//!     right: Box::new(Expr::Literal(Value::Array(ArrayValue::int_vector(vec![1, 2, 3])))),
//! }]);
//! let result = program.eval(&mut ctx).unwrap();
//! assert_eq!(result, Some(Value::Array(ArrayValue::int_vector(vec![3, 2, 1]))));
//! ```

// Prevent accidental debug output in library code.
#![deny(clippy::print_stderr)]

// Core modules
pub mod config;
pub mod program;
pub mod session;
pub mod vm;

pub use config::SessionConfig;
pub use program::{AssignTarget, Expr, FunctionExpr, Program};
pub use session::{Context, Registry};
pub use vm::error::{AplError, AplResult, ErrorKind};
pub use vm::value::Value;
pub use vm::{operators, primitives};
