//! Axis arguments of primitives invoked as `f[k]R`.

use crate::session::Context;
use crate::vm::convert::to_index_array;
use crate::vm::error::{AplError, AplResult};
use crate::vm::value::{AxisValue, Value};

/// Unpack an axis value into its argument and the 0-based axis numbers.
pub fn split_axis(ctx: &Context, axis: &AxisValue) -> AplResult<(Value, Vec<i64>)> {
    let idx = to_index_array(&axis.axis)
        .map_err(|e| AplError::InvalidAxis(format!("axis must be integral: {e}")))?;
    let axes = idx.ints().iter().map(|&k| k - ctx.origin()).collect();
    Ok(((*axis.value).clone(), axes))
}

/// The argument and the axis to work on: the single axis of an axis value,
/// or `default` for any other value.
///
/// Only `default` may count from the end. An explicit axis below the origin
/// is out of range for any array argument.
pub fn resolve_axis(ctx: &Context, r: &Value, default: i64) -> AplResult<(Value, i64)> {
    let Value::Axis(axis) = r else {
        return Ok((r.clone(), default));
    };
    let (value, axes) = split_axis(ctx, axis)?;
    match axes.as_slice() {
        [k] if *k < 0 => match value.as_array() {
            Some(array) => Err(AplError::axis_out_of_range(*k, array.rank())),
            None => Ok((value, *k)),
        },
        [k] => Ok((value, *k)),
        _ => Err(AplError::InvalidAxis(format!(
            "axis must be a scalar or length 1, got {} axes",
            axes.len()
        ))),
    }
}
