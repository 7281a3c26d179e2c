//! Value module - runtime values of the evaluator.
//!
//! # Module Organization
//!
//! - `array_data.rs`: ArrayData enum for type-segregated storage
//! - `array_element.rs`: ElementType for element type descriptors
//! - `array_macros.rs`: Macros for ArrayData dispatch
//! - `array_value/`: ArrayValue struct for N-D arrays (access, mutation sub-modules)
//! - `complex.rs`: Complex scalar
//! - `container.rs`: Dict, table, list and axis containers
//! - `value_enum.rs`: Value enum and ValueType

// Submodules
mod array_data;
mod array_element;
#[macro_use]
pub mod array_macros;
mod array_value;
mod complex;
mod container;
mod value_enum;

// Re-exports from submodules
pub use array_data::ArrayData;
pub use array_element::ElementType;
pub use array_value::ArrayValue;
pub use complex::Complex;
pub use container::{AxisValue, DictKey, DictValue, ListValue, TableValue};
pub use value_enum::{Value, ValueType};
