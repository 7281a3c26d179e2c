//! Evaluation core: values, assignment and primitives.

// Submodules
pub mod assign;
pub mod convert;
pub mod error;
pub mod function;
pub mod operators;
pub mod primitives;
pub mod shape;
pub mod value;

// Re-exports
pub use assign::{execute, execute_selective, Assignment, Indexes, Selection};
pub use convert::{to_element, to_index_array, IndexArray};
pub use error::{AplError, AplResult, ErrorKind};
pub use function::{Function, FunctionRef, NativeFunction};
pub use value::{ArrayData, ArrayValue, ElementType, Value};
