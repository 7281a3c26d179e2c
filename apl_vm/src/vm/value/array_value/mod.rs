//! ArrayValue - N-dimensional array with type-segregated storage.
//!
//! Elements are stored flat in row-major order (last axis fastest).
//!
//! # Sub-modules
//!
//! - `access`: Element access, reshape, prototype construction
//! - `mutation`: Element mutation, upgrade to mixed storage, unification

mod access;
mod mutation;

use super::super::error::{AplError, AplResult};
use super::super::shape::flatten;
use super::array_data::ArrayData;
use super::complex::Complex;
use super::Value;

/// N-dimensional array value with type-segregated storage.
///
/// Invariant: `data.raw_len() == flatten(&shape)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    /// Type-segregated storage
    data: ArrayData,
    /// Shape: [dim1, dim2, ...]
    shape: Vec<usize>,
}

impl ArrayValue {
    /// Create a new array with given data and shape.
    pub fn new(data: ArrayData, shape: Vec<usize>) -> AplResult<Self> {
        let size = flatten(&shape);
        if data.raw_len() != size {
            return Err(AplError::non_conformant(format!(
                "storage holds {} elements, shape {:?} needs {}",
                data.raw_len(),
                shape,
                size
            )));
        }
        Ok(Self { data, shape })
    }

    /// Construct from parts whose lengths are known to agree.
    pub(crate) fn from_parts(data: ArrayData, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.raw_len(), flatten(&shape));
        Self { data, shape }
    }

    /// Rank-1 array over `data`.
    pub fn vector(data: ArrayData) -> Self {
        let len = data.raw_len();
        Self {
            data,
            shape: vec![len],
        }
    }

    /// Create a 1D i64 vector
    pub fn int_vector(data: Vec<i64>) -> Self {
        Self::vector(ArrayData::Int(data))
    }

    /// Create a 1D f64 vector
    pub fn float_vector(data: Vec<f64>) -> Self {
        Self::vector(ArrayData::Float(data))
    }

    /// Create a 1D bool vector
    pub fn bool_vector(data: Vec<bool>) -> Self {
        Self::vector(ArrayData::Bool(data))
    }

    pub fn complex_vector(data: Vec<Complex>) -> Self {
        Self::vector(ArrayData::Complex(data))
    }

    pub fn str_vector<S: Into<String>>(data: Vec<S>) -> Self {
        Self::vector(ArrayData::Str(data.into_iter().map(Into::into).collect()))
    }

    /// Create a 1D mixed vector of boxed values
    pub fn mixed_vector(values: Vec<Value>) -> Self {
        Self::vector(ArrayData::Mixed(values))
    }

    /// Create an i64 array with the given shape.
    pub fn from_ints(data: Vec<i64>, shape: Vec<usize>) -> AplResult<Self> {
        Self::new(ArrayData::Int(data), shape)
    }

    /// Rank-0 array holding a single value
    pub fn scalar(value: Value) -> Self {
        Self {
            data: ArrayData::Mixed(vec![value]),
            shape: Vec::new(),
        }
    }

    /// Borrow the storage
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Consume into storage and shape
    pub fn into_parts(self) -> (ArrayData, Vec<usize>) {
        (self.data, self.shape)
    }
}
