//! Rotate along an axis: `L⌽R` (last axis) and `L⊖R` (first axis).

// `rem_euclid` with a positive modulus is never negative, so the i64→usize
// cast in `rot` keeps its value.
#![allow(clippy::cast_sign_loss)]

use crate::array_data_permute;
use crate::session::Context;
use crate::vm::convert::IndexArray;
use crate::vm::error::{AplError, AplResult};
use crate::vm::shape::{inc_array_index, normalize_axis, IndexConverter};
use crate::vm::value::{ArrayValue, Value};

use super::axis::resolve_axis;

/// Source position of output position `i` rotated by `n` within `size`.
/// `n` is reduced before the add so that any amount stays in range.
fn rot(i: usize, n: i64, size: usize) -> usize {
    let m = size as i64;
    (i as i64 + n.rem_euclid(m)).rem_euclid(m) as usize
}

/// Rotate `r` along `axis` by `amounts`.
///
/// A vector takes a single amount. Higher ranks take one amount per position
/// of the shape with `axis` removed; a single amount is repeated to that
/// shape. Non-array values are returned unchanged.
pub fn rotate(ctx: &Context, amounts: &IndexArray, r: &Value, axis: i64) -> AplResult<Value> {
    let (r, axis) = resolve_axis(ctx, r, axis)?;
    let array = match r {
        Value::Array(array) => array,
        other => return Ok(other),
    };
    let shape = array.shape().to_vec();
    let axis = normalize_axis(axis, shape.len())?;

    if shape.len() == 1 {
        let [n] = amounts.ints() else {
            return Err(AplError::non_conformant(format!(
                "rotate: a vector needs one amount, got shape {:?}",
                amounts.shape()
            )));
        };
        let size = shape[0];
        let order = (0..size).map(|i| rot(i, *n, size));
        let data = array_data_permute!(array.data(), order);
        return Ok(Value::Array(ArrayValue::from_parts(data, shape)));
    }

    let lshape: Vec<usize> = shape
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != axis)
        .map(|(_, &n)| n)
        .collect();
    let amounts = if amounts.len() == 1 {
        amounts.reshape(&lshape)
    } else if amounts.shape() == lshape.as_slice() {
        amounts.clone()
    } else {
        return Err(AplError::non_conformant(format!(
            "rotate: amounts have shape {:?}, expected {:?}",
            amounts.shape(),
            lshape
        )));
    };

    let (lic, mut lidx) = IndexConverter::new(&lshape);
    let (ric, mut src) = IndexConverter::new(&shape);
    let mut dst = vec![0; shape.len()];
    let mut order = Vec::with_capacity(array.size());
    for _ in 0..array.size() {
        lidx[..axis].copy_from_slice(&dst[..axis]);
        lidx[axis..].copy_from_slice(&dst[axis + 1..]);
        let n = amounts.ints()[lic.index(&lidx)];
        src.copy_from_slice(&dst);
        src[axis] = rot(dst[axis], n, shape[axis]);
        order.push(ric.index(&src));
        inc_array_index(&mut dst, &shape);
    }
    let data = array_data_permute!(array.data(), order.into_iter());
    Ok(Value::Array(ArrayValue::from_parts(data, shape)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Registry;
    use crate::vm::value::AxisValue;
    use std::rc::Rc;

    fn ctx() -> Context {
        Context::new(Rc::new(Registry::new()))
    }

    fn ints(v: Vec<i64>, shape: Vec<usize>) -> Value {
        Value::Array(ArrayValue::from_ints(v, shape).unwrap())
    }

    // ── vectors ───────────────────────────────────────────────────────────────

    #[test]
    fn test_rotate_vector() {
        let v = ints(vec![1, 2, 3, 4, 5], vec![5]);
        let one = IndexArray::vector(vec![2]);
        assert_eq!(
            rotate(&ctx(), &one, &v, -1).unwrap(),
            ints(vec![3, 4, 5, 1, 2], vec![5])
        );
        let back = IndexArray::vector(vec![-1]);
        assert_eq!(
            rotate(&ctx(), &back, &v, -1).unwrap(),
            ints(vec![5, 1, 2, 3, 4], vec![5])
        );
        let far = IndexArray::vector(vec![12]);
        assert_eq!(
            rotate(&ctx(), &far, &v, -1).unwrap(),
            ints(vec![3, 4, 5, 1, 2], vec![5])
        );
    }

    #[test]
    fn test_rotate_extreme_amounts() {
        let v = ints(vec![1, 2, 3, 4], vec![4]);
        assert_eq!(
            rotate(&ctx(), &IndexArray::vector(vec![i64::MAX]), &v, -1).unwrap(),
            ints(vec![4, 1, 2, 3], vec![4])
        );
        assert_eq!(
            rotate(&ctx(), &IndexArray::vector(vec![i64::MIN]), &v, -1).unwrap(),
            v
        );
        let m = ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        let amounts = IndexArray::vector(vec![i64::MIN, i64::MAX]);
        assert_eq!(
            rotate(&ctx(), &amounts, &m, -1).unwrap(),
            ints(vec![2, 3, 1, 5, 6, 4], vec![2, 3])
        );
    }

    #[test]
    fn test_rotate_vector_needs_one_amount() {
        let v = ints(vec![1, 2, 3], vec![3]);
        let two = IndexArray::vector(vec![1, 2]);
        assert!(matches!(
            rotate(&ctx(), &two, &v, -1),
            Err(AplError::NonConformant(_))
        ));
    }

    #[test]
    fn test_rotate_empty_vector() {
        let v = ints(vec![], vec![0]);
        assert_eq!(rotate(&ctx(), &IndexArray::vector(vec![3]), &v, -1).unwrap(), v);
    }

    // ── matrices ──────────────────────────────────────────────────────────────

    #[test]
    fn test_rotate_matrix_rows_by_scalar() {
        let m = ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        assert_eq!(
            rotate(&ctx(), &IndexArray::vector(vec![1]), &m, -1).unwrap(),
            ints(vec![2, 3, 1, 5, 6, 4], vec![2, 3])
        );
    }

    #[test]
    fn test_rotate_matrix_per_row_amounts() {
        let m = ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        let amounts = IndexArray::vector(vec![0, 1]);
        assert_eq!(
            rotate(&ctx(), &amounts, &m, -1).unwrap(),
            ints(vec![1, 2, 3, 5, 6, 4], vec![2, 3])
        );
    }

    #[test]
    fn test_rotate_first_axis() {
        let m = ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        let amounts = IndexArray::vector(vec![1, 0, 1]);
        assert_eq!(
            rotate(&ctx(), &amounts, &m, 0).unwrap(),
            ints(vec![4, 2, 6, 1, 5, 3], vec![2, 3])
        );
    }

    #[test]
    fn test_rotate_amount_shape_mismatch() {
        let m = ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        let amounts = IndexArray::vector(vec![1, 2, 3]);
        assert!(matches!(
            rotate(&ctx(), &amounts, &m, -1),
            Err(AplError::NonConformant(_))
        ));
    }

    #[test]
    fn test_rotate_with_axis_value_and_bad_axis() {
        let m = ints(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        let amounts = IndexArray::vector(vec![1]);
        let first = Value::Axis(AxisValue::new(m.clone(), Value::Int(1)));
        assert_eq!(
            rotate(&ctx(), &amounts, &first, -1).unwrap(),
            rotate(&ctx(), &amounts, &m, 0).unwrap()
        );
        let bad = Value::Axis(AxisValue::new(m, Value::Int(3)));
        assert!(matches!(
            rotate(&ctx(), &amounts, &bad, -1),
            Err(AplError::AxisOutOfRange { axis: 2, rank: 2 })
        ));
    }

    #[test]
    fn test_rotate_scalar_passes_through() {
        let amounts = IndexArray::vector(vec![1]);
        assert_eq!(
            rotate(&ctx(), &amounts, &Value::Int(7), -1).unwrap(),
            Value::Int(7)
        );
    }
}
