//! Reverse along an axis: `⌽R` (last axis) and `⊖R` (first axis).

use crate::array_data_permute;
use crate::session::Context;
use crate::vm::error::AplResult;
use crate::vm::shape::{inc_array_index, normalize_axis, IndexConverter};
use crate::vm::value::{ArrayValue, Value};

use super::axis::resolve_axis;

/// Reverse `r` along `axis`, or along the axis carried by an axis value.
/// Non-array values are returned unchanged.
pub fn reverse(ctx: &Context, r: &Value, axis: i64) -> AplResult<Value> {
    let (r, axis) = resolve_axis(ctx, r, axis)?;
    let array = match r {
        Value::Array(array) => array,
        other => return Ok(other),
    };
    let shape = array.shape();
    let axis = normalize_axis(axis, shape.len())?;

    let (ic, mut src) = IndexConverter::new(shape);
    let mut dst = vec![0; shape.len()];
    let mut order = Vec::with_capacity(array.size());
    for _ in 0..array.size() {
        src.copy_from_slice(&dst);
        src[axis] = shape[axis] - dst[axis] - 1;
        order.push(ic.index(&src));
        inc_array_index(&mut dst, shape);
    }
    let data = array_data_permute!(array.data(), order.into_iter());
    Ok(Value::Array(ArrayValue::from_parts(data, shape.to_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Registry;
    use crate::vm::error::AplError;
    use crate::vm::value::AxisValue;
    use std::rc::Rc;

    fn ctx() -> Context {
        Context::new(Rc::new(Registry::new()))
    }

    fn matrix() -> Value {
        Value::Array(ArrayValue::from_ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap())
    }

    #[test]
    fn test_reverse_vector() {
        let v = Value::Array(ArrayValue::str_vector(vec!["a", "b", "c"]));
        assert_eq!(
            reverse(&ctx(), &v, -1).unwrap(),
            Value::Array(ArrayValue::str_vector(vec!["c", "b", "a"]))
        );
    }

    #[test]
    fn test_reverse_last_and_first_axis() {
        assert_eq!(
            reverse(&ctx(), &matrix(), -1).unwrap(),
            Value::Array(ArrayValue::from_ints(vec![3, 2, 1, 6, 5, 4], vec![2, 3]).unwrap())
        );
        assert_eq!(
            reverse(&ctx(), &matrix(), 0).unwrap(),
            Value::Array(ArrayValue::from_ints(vec![4, 5, 6, 1, 2, 3], vec![2, 3]).unwrap())
        );
    }

    #[test]
    fn test_reverse_with_axis_value() {
        // ⌽[1] with origin 1 reverses the first axis.
        let r = Value::Axis(AxisValue::new(matrix(), Value::Int(1)));
        assert_eq!(reverse(&ctx(), &r, -1).unwrap(), reverse(&ctx(), &matrix(), 0).unwrap());
    }

    #[test]
    fn test_reverse_axis_below_origin() {
        // ⌽[0] with origin 1 names no axis.
        let r = Value::Axis(AxisValue::new(matrix(), Value::Int(0)));
        assert!(matches!(
            reverse(&ctx(), &r, -1),
            Err(AplError::AxisOutOfRange { axis: -1, rank: 2 })
        ));
    }

    #[test]
    fn test_reverse_scalar_passes_through() {
        assert_eq!(reverse(&ctx(), &Value::Float(2.5), -1).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_reverse_empty_and_bad_axis() {
        let empty = Value::Array(ArrayValue::int_vector(vec![]));
        assert_eq!(reverse(&ctx(), &empty, -1).unwrap(), empty);
        assert!(matches!(
            reverse(&ctx(), &matrix(), 2),
            Err(AplError::AxisOutOfRange { axis: 2, rank: 2 })
        ));
    }
}
