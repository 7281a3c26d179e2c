//! ArrayData - Type-segregated array storage.
//!
//! This module contains the `ArrayData` enum which holds a homogeneous vector
//! for each uniform element type and a boxed vector for mixed arrays.

use num_traits::Zero;

use super::super::error::{AplError, AplResult};
use super::array_element::ElementType;
use super::complex::Complex;
use super::Value;

/// Type-segregated array storage.
/// Each uniform variant holds a homogeneous vector of the corresponding type.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Float(Vec<f64>),
    Complex(Vec<Complex>),
    Str(Vec<String>),
    Mixed(Vec<Value>),
}

/// Integral float to int, `None` for fractions, NaN and out-of-range values.
fn float_to_int(x: f64) -> Option<i64> {
    if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x as i64)
    } else {
        None
    }
}

/// Int to float, `None` when the float does not hold `x` exactly.
fn int_to_float(x: i64) -> Option<f64> {
    let f = x as f64;
    (float_to_int(f) == Some(x)).then_some(f)
}

impl ArrayData {
    /// Get the element type of this data
    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayData::Bool(_) => ElementType::Bool,
            ArrayData::Int(_) => ElementType::Int,
            ArrayData::Float(_) => ElementType::Float,
            ArrayData::Complex(_) => ElementType::Complex,
            ArrayData::Str(_) => ElementType::Str,
            ArrayData::Mixed(_) => ElementType::Mixed,
        }
    }

    /// Get the raw length (number of stored elements)
    pub fn raw_len(&self) -> usize {
        crate::array_data_dispatch!(self, len)
    }

    /// Check if the data is empty
    pub fn is_empty(&self) -> bool {
        crate::array_data_dispatch!(self, is_empty)
    }

    /// Check if this is boxed storage
    pub fn is_mixed(&self) -> bool {
        matches!(self, ArrayData::Mixed(_))
    }

    /// Zero-filled storage of `len` elements.
    ///
    /// Mixed storage is filled with `Int(0)`.
    pub fn zeros(element_type: ElementType, len: usize) -> Self {
        match element_type {
            ElementType::Bool => ArrayData::Bool(vec![false; len]),
            ElementType::Int => ArrayData::Int(vec![i64::zero(); len]),
            ElementType::Float => ArrayData::Float(vec![f64::zero(); len]),
            ElementType::Complex => ArrayData::Complex(vec![Complex::zero(); len]),
            ElementType::Str => ArrayData::Str(vec![String::new(); len]),
            ElementType::Mixed => ArrayData::Mixed(vec![Value::Int(0); len]),
        }
    }

    /// Get a value at a linear index, converting to Value
    pub fn get_value(&self, index: usize) -> Option<Value> {
        match self {
            ArrayData::Bool(v) => v.get(index).map(|&x| Value::Bool(x)),
            ArrayData::Int(v) => v.get(index).map(|&x| Value::Int(x)),
            ArrayData::Float(v) => v.get(index).map(|&x| Value::Float(x)),
            ArrayData::Complex(v) => v.get(index).map(|&x| Value::Complex(x)),
            ArrayData::Str(v) => v.get(index).map(|x| Value::Str(x.clone())),
            ArrayData::Mixed(v) => v.get(index).cloned(),
        }
    }

    /// Set a value at a linear index.
    ///
    /// Uniform storage accepts values that convert without loss; everything
    /// else is a `TypeMismatch`. Mixed storage accepts any value.
    pub fn set_value(&mut self, index: usize, value: Value) -> AplResult<()> {
        let len = self.raw_len();
        if index >= len {
            return Err(AplError::index_out_of_range(index as i64, len));
        }
        let mismatch = |value: &Value, ty: ElementType| {
            AplError::type_mismatch(format!(
                "cannot store {} in {} array",
                value.type_name(),
                ty
            ))
        };
        match self {
            ArrayData::Bool(v) => match value {
                Value::Bool(b) => v[index] = b,
                Value::Int(0) => v[index] = false,
                Value::Int(1) => v[index] = true,
                other => return Err(mismatch(&other, ElementType::Bool)),
            },
            ArrayData::Int(v) => match value {
                Value::Int(x) => v[index] = x,
                Value::Bool(b) => v[index] = i64::from(b),
                Value::Float(x) => match float_to_int(x) {
                    Some(n) => v[index] = n,
                    None => return Err(mismatch(&Value::Float(x), ElementType::Int)),
                },
                other => return Err(mismatch(&other, ElementType::Int)),
            },
            ArrayData::Float(v) => match value {
                Value::Float(x) => v[index] = x,
                Value::Int(x) => match int_to_float(x) {
                    Some(f) => v[index] = f,
                    None => return Err(mismatch(&Value::Int(x), ElementType::Float)),
                },
                Value::Bool(b) => v[index] = f64::from(u8::from(b)),
                other => return Err(mismatch(&other, ElementType::Float)),
            },
            ArrayData::Complex(v) => match value {
                Value::Complex(z) => v[index] = z,
                Value::Float(x) => v[index] = Complex::from_real(x),
                Value::Int(x) => match int_to_float(x) {
                    Some(f) => v[index] = Complex::from_real(f),
                    None => return Err(mismatch(&Value::Int(x), ElementType::Complex)),
                },
                Value::Bool(b) => v[index] = Complex::from_real(f64::from(u8::from(b))),
                other => return Err(mismatch(&other, ElementType::Complex)),
            },
            ArrayData::Str(v) => match value {
                Value::Str(s) => v[index] = s,
                other => return Err(mismatch(&other, ElementType::Str)),
            },
            ArrayData::Mixed(v) => v[index] = value,
        }
        Ok(())
    }

    /// All elements as boxed values, in storage order.
    pub fn to_values(&self) -> Vec<Value> {
        match self {
            ArrayData::Bool(v) => v.iter().map(|&x| Value::Bool(x)).collect(),
            ArrayData::Int(v) => v.iter().map(|&x| Value::Int(x)).collect(),
            ArrayData::Float(v) => v.iter().map(|&x| Value::Float(x)).collect(),
            ArrayData::Complex(v) => v.iter().map(|&x| Value::Complex(x)).collect(),
            ArrayData::Str(v) => v.iter().map(|x| Value::Str(x.clone())).collect(),
            ArrayData::Mixed(v) => v.clone(),
        }
    }

    /// Build storage of `element_type` from boxed values.
    pub fn from_values(element_type: ElementType, values: &[Value]) -> AplResult<Self> {
        if element_type == ElementType::Mixed {
            return Ok(ArrayData::Mixed(values.to_vec()));
        }
        let mut data = ArrayData::zeros(element_type, values.len());
        for (i, v) in values.iter().enumerate() {
            data.set_value(i, v.clone())?;
        }
        Ok(data)
    }

    /// Storage of `len` elements repeating this one cyclically.
    ///
    /// Empty storage yields `len` zeros of the same variant.
    pub fn cycle(&self, len: usize) -> Self {
        if self.is_empty() {
            return ArrayData::zeros(self.element_type(), len);
        }
        let order = (0..len).map(|i| i % self.raw_len());
        crate::array_data_permute!(self, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── element_type / raw_len ────────────────────────────────────────────────

    #[test]
    fn test_element_type_per_variant() {
        assert_eq!(ArrayData::Int(vec![1]).element_type(), ElementType::Int);
        assert_eq!(ArrayData::Str(vec![]).element_type(), ElementType::Str);
        assert_eq!(ArrayData::Mixed(vec![]).element_type(), ElementType::Mixed);
    }

    #[test]
    fn test_raw_len_and_is_empty() {
        assert_eq!(ArrayData::Float(vec![1.0, 2.0, 3.0]).raw_len(), 3);
        assert!(ArrayData::Complex(vec![]).is_empty());
    }

    // ── zeros ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_zeros_uses_variant_zero() {
        assert_eq!(ArrayData::zeros(ElementType::Int, 2), ArrayData::Int(vec![0, 0]));
        assert_eq!(
            ArrayData::zeros(ElementType::Str, 1),
            ArrayData::Str(vec![String::new()])
        );
        assert_eq!(
            ArrayData::zeros(ElementType::Mixed, 1),
            ArrayData::Mixed(vec![Value::Int(0)])
        );
    }

    // ── set_value ─────────────────────────────────────────────────────────────

    #[test]
    fn test_set_value_lossless_conversions() {
        let mut floats = ArrayData::Float(vec![0.0; 2]);
        floats.set_value(1, Value::Int(3)).unwrap();
        assert_eq!(floats, ArrayData::Float(vec![0.0, 3.0]));

        let mut ints = ArrayData::Int(vec![0; 2]);
        ints.set_value(0, Value::Float(4.0)).unwrap();
        assert_eq!(ints, ArrayData::Int(vec![4, 0]));

        let mut bools = ArrayData::Bool(vec![false]);
        bools.set_value(0, Value::Int(1)).unwrap();
        assert_eq!(bools, ArrayData::Bool(vec![true]));

        let mut cplx = ArrayData::Complex(vec![Complex::zero()]);
        cplx.set_value(0, Value::Float(1.5)).unwrap();
        assert_eq!(cplx, ArrayData::Complex(vec![Complex::new(1.5, 0.0)]));
    }

    #[test]
    fn test_set_value_rejects_lossy_values() {
        let mut ints = ArrayData::Int(vec![0]);
        assert!(matches!(
            ints.set_value(0, Value::Float(2.5)),
            Err(AplError::TypeMismatch(_))
        ));
        let mut bools = ArrayData::Bool(vec![false]);
        assert!(matches!(
            bools.set_value(0, Value::Int(2)),
            Err(AplError::TypeMismatch(_))
        ));
        let mut strs = ArrayData::Str(vec![String::new()]);
        assert!(strs.set_value(0, Value::Int(1)).is_err());
    }

    #[test]
    fn test_set_value_rejects_ints_beyond_float_precision() {
        let big = (1i64 << 53) + 1;
        let mut floats = ArrayData::Float(vec![0.0]);
        assert!(matches!(
            floats.set_value(0, Value::Int(big)),
            Err(AplError::TypeMismatch(_))
        ));
        assert!(floats.set_value(0, Value::Int(i64::MAX)).is_err());
        floats.set_value(0, Value::Int(1 << 53)).unwrap();
        floats.set_value(0, Value::Int(i64::MIN)).unwrap();

        let mut cplx = ArrayData::Complex(vec![Complex::zero()]);
        assert!(cplx.set_value(0, Value::Int(-big)).is_err());
        cplx.set_value(0, Value::Int(-7)).unwrap();
        assert_eq!(cplx, ArrayData::Complex(vec![Complex::new(-7.0, 0.0)]));
    }

    #[test]
    fn test_set_value_out_of_range() {
        let mut mixed = ArrayData::Mixed(vec![Value::Int(0)]);
        assert_eq!(
            mixed.set_value(1, Value::Int(1)),
            Err(AplError::IndexOutOfRange { index: 1, size: 1 })
        );
    }

    // ── cycle ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_cycle_repeats_source() {
        let data = ArrayData::Int(vec![1, 2, 3]);
        assert_eq!(data.cycle(5), ArrayData::Int(vec![1, 2, 3, 1, 2]));
        assert_eq!(data.cycle(2), ArrayData::Int(vec![1, 2]));
    }

    #[test]
    fn test_cycle_empty_source_zero_fills() {
        let data = ArrayData::Float(vec![]);
        assert_eq!(data.cycle(2), ArrayData::Float(vec![0.0, 0.0]));
    }
}
