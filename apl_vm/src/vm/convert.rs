//! Conversions between values and element types.
//!
//! - `to_element`: convert one value to the element type of a uniform column
//! - `to_index_array`: coerce a value to an integer index carrier

use super::error::{AplError, AplResult};
use super::shape::flatten;
use super::value::{ArrayData, ArrayValue, ElementType, Value};

/// Integer array used as the raw index carrier of indexed assignment and as
/// rotation amounts and axis numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexArray {
    shape: Vec<usize>,
    ints: Vec<i64>,
}

impl IndexArray {
    pub fn new(shape: Vec<usize>, ints: Vec<i64>) -> AplResult<Self> {
        if flatten(&shape) != ints.len() {
            return Err(AplError::non_conformant(format!(
                "index array of shape {:?} holds {} entries",
                shape,
                ints.len()
            )));
        }
        Ok(Self { shape, ints })
    }

    /// Rank-1 index array
    pub fn vector(ints: Vec<i64>) -> Self {
        Self {
            shape: vec![ints.len()],
            ints,
        }
    }

    /// Row/column selection of a table: the rows followed by the column
    /// positions, with `shape[0]` holding the row count.
    ///
    /// This encoding holds `shape[0] + shape[1]` entries rather than the
    /// product of its shape.
    pub fn table_selection(rows: Vec<i64>, cols: Vec<i64>) -> Self {
        let shape = vec![rows.len(), cols.len()];
        let mut ints = rows;
        ints.extend(cols);
        Self { shape, ints }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ints(&self) -> &[i64] {
        &self.ints
    }

    pub fn len(&self) -> usize {
        self.ints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty()
    }

    /// Flat offsets `0..size` laid out in `shape`.
    pub fn offsets(shape: &[usize]) -> Self {
        let size = flatten(shape) as i64;
        Self {
            shape: shape.to_vec(),
            ints: (0..size).collect(),
        }
    }

    /// Index array of `shape` refilled cyclically.
    pub fn reshape(&self, shape: &[usize]) -> IndexArray {
        let n = flatten(shape);
        let ints = if self.ints.is_empty() {
            vec![0; n]
        } else {
            self.ints.iter().copied().cycle().take(n).collect()
        };
        IndexArray {
            shape: shape.to_vec(),
            ints,
        }
    }
}

/// Fails for a table selection, whose entries do not fill its shape.
impl TryFrom<IndexArray> for ArrayValue {
    type Error = AplError;

    fn try_from(idx: IndexArray) -> AplResult<Self> {
        ArrayValue::new(ArrayData::Int(idx.ints), idx.shape)
    }
}

/// Convert `value` to `element_type` without loss.
pub fn to_element(value: &Value, element_type: ElementType) -> AplResult<Value> {
    if element_type == ElementType::Mixed {
        return Ok(value.clone());
    }
    let mut cell = ArrayData::zeros(element_type, 1);
    cell.set_value(0, value.clone()).map_err(|_| {
        AplError::conversion(format!(
            "cannot convert {} to {}",
            value.type_name(),
            element_type
        ))
    })?;
    cell.get_value(0)
        .ok_or_else(|| AplError::conversion("empty conversion cell"))
}

fn index_of(value: &Value) -> AplResult<i64> {
    match to_element(value, ElementType::Int)? {
        Value::Int(n) => Ok(n),
        other => Err(AplError::conversion(format!(
            "cannot use {} as an index",
            other.type_name()
        ))),
    }
}

/// Coerce `value` to an index array.
///
/// Int and bool scalars become one-element vectors. Arrays keep their shape;
/// their elements must all convert to integers. Empty arrays are rejected.
pub fn to_index_array(value: &Value) -> AplResult<IndexArray> {
    match value {
        Value::Int(_) | Value::Bool(_) => Ok(IndexArray::vector(vec![index_of(value)?])),
        Value::Array(a) => {
            if a.is_empty() {
                return Err(AplError::conversion("empty array cannot index"));
            }
            let ints = match a.data() {
                ArrayData::Int(v) => v.clone(),
                ArrayData::Bool(v) => v.iter().map(|&b| i64::from(b)).collect(),
                ArrayData::Float(_) | ArrayData::Mixed(_) => a
                    .values()
                    .iter()
                    .map(index_of)
                    .collect::<AplResult<Vec<_>>>()?,
                ArrayData::Complex(_) | ArrayData::Str(_) => {
                    return Err(AplError::conversion(format!(
                        "{} array cannot index",
                        a.element_type()
                    )))
                }
            };
            Ok(IndexArray {
                shape: a.shape().to_vec(),
                ints,
            })
        }
        other => Err(AplError::conversion(format!(
            "{} cannot index",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::value::Complex;

    // ── to_element ────────────────────────────────────────────────────────────

    #[test]
    fn test_to_element_widens() {
        assert_eq!(
            to_element(&Value::Int(2), ElementType::Float).unwrap(),
            Value::Float(2.0)
        );
        assert_eq!(
            to_element(&Value::Float(1.0), ElementType::Complex).unwrap(),
            Value::Complex(Complex::new(1.0, 0.0))
        );
    }

    #[test]
    fn test_to_element_failure_is_conversion_error() {
        let err = to_element(&Value::Str("a".into()), ElementType::Int).unwrap_err();
        assert!(matches!(err, AplError::ConversionError(_)));
        assert!(to_element(&Value::Float(0.5), ElementType::Int).is_err());
    }

    // ── to_index_array ────────────────────────────────────────────────────────

    #[test]
    fn test_scalar_to_index_array() {
        let idx = to_index_array(&Value::Int(4)).unwrap();
        assert_eq!(idx.shape(), &[1]);
        assert_eq!(idx.ints(), &[4]);
    }

    #[test]
    fn test_array_to_index_array_keeps_shape() {
        let a = ArrayValue::from_ints(vec![1, 2, 3, 4], vec![2, 2]).unwrap();
        let idx = to_index_array(&Value::Array(a)).unwrap();
        assert_eq!(idx.shape(), &[2, 2]);

        let floats = Value::Array(ArrayValue::float_vector(vec![1.0, 3.0]));
        assert_eq!(to_index_array(&floats).unwrap().ints(), &[1, 3]);

        let mixed = Value::Array(ArrayValue::mixed_vector(vec![Value::Int(1), Value::Bool(true)]));
        assert_eq!(to_index_array(&mixed).unwrap().ints(), &[1, 1]);
    }

    #[test]
    fn test_to_index_array_rejects() {
        assert!(to_index_array(&Value::Array(ArrayValue::int_vector(vec![]))).is_err());
        assert!(to_index_array(&Value::Str("x".into())).is_err());
        assert!(to_index_array(&Value::Array(ArrayValue::float_vector(vec![0.5]))).is_err());
    }

    #[test]
    fn test_offsets_convert_to_array() {
        let idx = IndexArray::offsets(&[2, 2]);
        assert_eq!(idx.ints(), &[0, 1, 2, 3]);
        let a = ArrayValue::try_from(idx).unwrap();
        assert_eq!(a, ArrayValue::from_ints(vec![0, 1, 2, 3], vec![2, 2]).unwrap());

        let cells = IndexArray::table_selection(vec![0, 1], vec![0]);
        assert!(matches!(
            ArrayValue::try_from(cells),
            Err(AplError::NonConformant(_))
        ));
    }

    #[test]
    fn test_index_reshape_cycles() {
        let idx = IndexArray::vector(vec![1, 2]);
        assert_eq!(idx.reshape(&[3]).ints(), &[1, 2, 1]);
    }
}
