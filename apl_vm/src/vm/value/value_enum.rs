//! Value - The runtime value type of the evaluator.
//!
//! This module contains:
//! - `Value`: The closed enum over every value kind
//! - `ValueType`: A payload-free type tag for Value variants

use super::array_element::ElementType;
use super::array_value::ArrayValue;
use super::complex::Complex;
use super::container::{AxisValue, DictValue, ListValue, TableValue};

/// Runtime value. Every variant owns its storage, so `clone` is a deep copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Scalars
    Int(i64),
    Float(f64),
    Complex(Complex),
    Bool(bool),
    Str(String),
    // Containers
    Array(ArrayValue),
    List(ListValue),
    Object(DictValue<Value>),
    Table(TableValue),
    // Primitive argument with an axis specification
    Axis(AxisValue),
}

impl Value {
    /// Get the ValueType of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Complex(_) => ValueType::Complex,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::Str,
            Value::Array(_) => ValueType::Array,
            Value::List(_) => ValueType::List,
            Value::Object(_) => ValueType::Object,
            Value::Table(_) => ValueType::Table,
            Value::Axis(_) => ValueType::Axis,
        }
    }

    /// Get a string representation of the type for error messages
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    pub fn is_scalar(&self) -> bool {
        self.element_type().is_some()
    }

    /// Element type of a scalar, `None` for containers.
    pub fn element_type(&self) -> Option<ElementType> {
        match self {
            Value::Int(_) => Some(ElementType::Int),
            Value::Float(_) => Some(ElementType::Float),
            Value::Complex(_) => Some(ElementType::Complex),
            Value::Bool(_) => Some(ElementType::Bool),
            Value::Str(_) => Some(ElementType::Str),
            Value::Array(_)
            | Value::List(_)
            | Value::Object(_)
            | Value::Table(_)
            | Value::Axis(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Value::Array(a)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// Value type tag without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Float,
    Complex,
    Bool,
    Str,
    Array,
    List,
    Object,
    Table,
    Axis,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Complex => "complex",
            ValueType::Bool => "bool",
            ValueType::Str => "string",
            ValueType::Array => "array",
            ValueType::List => "list",
            ValueType::Object => "object",
            ValueType::Table => "table",
            ValueType::Axis => "axis",
        }
    }
}
