//! ArrayValue access methods: element lookup, reshape and prototypes.

use super::super::super::error::{AplError, AplResult};
use super::super::super::shape::flatten;
use super::super::array_data::ArrayData;
use super::super::array_element::ElementType;
use super::super::Value;
use super::ArrayValue;

impl ArrayValue {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements: 1 for rank 0, 0 when any axis is 0.
    pub fn size(&self) -> usize {
        flatten(&self.shape)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// Check if storage is one of the uniform variants
    pub fn is_uniform(&self) -> bool {
        !self.data.is_mixed()
    }

    /// Element at a flat row-major offset.
    pub fn at(&self, index: usize) -> AplResult<Value> {
        self.data
            .get_value(index)
            .ok_or_else(|| AplError::index_out_of_range(index as i64, self.size()))
    }

    /// All elements as boxed values in row-major order.
    pub fn values(&self) -> Vec<Value> {
        self.data.to_values()
    }

    /// Array of `shape` refilled cyclically from this array's elements.
    ///
    /// The storage variant is kept. An empty source yields zeros.
    pub fn reshape(&self, shape: &[usize]) -> ArrayValue {
        let data = self.data.cycle(flatten(shape));
        ArrayValue::from_parts(data, shape.to_vec())
    }

    /// New zero-filled array of `shape` with the same storage variant as
    /// `prototype`.
    pub fn make_like(prototype: &ArrayValue, shape: &[usize]) -> ArrayValue {
        let data = ArrayData::zeros(prototype.element_type(), flatten(shape));
        ArrayValue::from_parts(data, shape.to_vec())
    }
}
