//! Row/column update of tables.
//!
//! The right argument is first turned into one replacement sub-column per
//! selected key, each holding `rows.len()` elements. Every sub-column is then
//! merged into its column, optionally through the modifier.

use crate::session::Context;
use crate::vm::convert::to_element;
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::Function;
use crate::vm::value::{ArrayData, ArrayValue, DictKey, DictValue, TableValue, Value};

pub fn update_table(
    ctx: &Context,
    table: &mut TableValue,
    rows: &[usize],
    cols: &[usize],
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    let keys = cols
        .iter()
        .map(|&c| {
            table
                .keys()
                .get(c)
                .cloned()
                .ok_or_else(|| AplError::index_out_of_range(c as i64, table.keys().len()))
        })
        .collect::<AplResult<Vec<_>>>()?;

    let replacements = match r {
        Value::Array(a) => from_array(table, &keys, rows.len(), a)?,
        Value::Table(t) => from_table(&keys, rows.len(), t)?,
        Value::Object(o) => from_object(&keys, rows.len(), o)?,
        scalar => keys.iter().map(|_| broadcast(scalar, rows.len())).collect(),
    };

    for (key, replacement) in keys.into_iter().zip(replacements) {
        let column = table
            .column(&key)
            .ok_or_else(|| AplError::key_mismatch(format!("no column {key}")))?;
        let merged = merge_column(ctx, column, rows, replacement, modifier)
            .map_err(|e| e.with_context(key.to_string()))?;
        table.set_column(key, merged)?;
    }
    Ok(())
}

/// A rank-2 array of shape `[n, keys]`, or a vector of `n` elements for a
/// single column. Every cell is converted to its column's element type.
fn from_array(
    table: &TableValue,
    keys: &[DictKey],
    n: usize,
    a: &ArrayValue,
) -> AplResult<Vec<ArrayValue>> {
    let reshaped;
    let a = if a.rank() == 1 && a.size() == n {
        reshaped = a.reshape(&[n, 1]);
        &reshaped
    } else {
        a
    };
    if a.shape() != [n, keys.len()] {
        return Err(AplError::non_conformant(format!(
            "right array has shape {:?}, selection is {}x{}",
            a.shape(),
            n,
            keys.len()
        )));
    }
    let ncols = keys.len();
    let mut out = Vec::with_capacity(ncols);
    for (k, key) in keys.iter().enumerate() {
        let ty = table
            .column(key)
            .map(ArrayValue::element_type)
            .ok_or_else(|| AplError::key_mismatch(format!("no column {key}")))?;
        let mut data = ArrayData::zeros(ty, n);
        for i in 0..n {
            let cell = to_element(&a.at(i * ncols + k)?, ty)?;
            data.set_value(i, cell)?;
        }
        out.push(ArrayValue::vector(data));
    }
    Ok(out)
}

fn check_keys(selected: &[DictKey], given: &[DictKey]) -> AplResult<()> {
    if selected != given {
        return Err(AplError::key_mismatch(format!(
            "keys on the right {:?} do not match {:?}",
            given, selected
        )));
    }
    Ok(())
}

fn from_table(keys: &[DictKey], n: usize, t: &TableValue) -> AplResult<Vec<ArrayValue>> {
    check_keys(keys, t.keys())?;
    keys.iter()
        .map(|key| {
            let column = t
                .column(key)
                .ok_or_else(|| AplError::key_mismatch(format!("no column {key}")))?;
            if column.rank() != 1 || column.size() != n {
                return Err(AplError::non_conformant(format!(
                    "right table has {} rows instead of {}",
                    column.size(),
                    n
                ))
                .with_context(key.to_string()));
            }
            Ok(column.clone())
        })
        .collect()
}

fn from_object(keys: &[DictKey], n: usize, o: &DictValue<Value>) -> AplResult<Vec<ArrayValue>> {
    check_keys(keys, o.keys())?;
    keys.iter()
        .map(|key| match o.at(key) {
            Some(Value::Array(_)) => Err(AplError::type_mismatch(
                "object value must be a scalar, not an array",
            )
            .with_context(key.to_string())),
            Some(v) => Ok(broadcast(v, n)),
            None => Err(AplError::key_mismatch(format!("no value for {key}"))),
        })
        .collect()
}

fn broadcast(value: &Value, n: usize) -> ArrayValue {
    ArrayValue::mixed_vector(vec![value.clone(); n]).unify_or_keep()
}

fn merge_column(
    ctx: &Context,
    column: &ArrayValue,
    rows: &[usize],
    replacement: ArrayValue,
    modifier: Option<&dyn Function>,
) -> AplResult<ArrayValue> {
    let replacement = match modifier {
        Some(f) => {
            let mut old = ArrayValue::make_like(column, &[rows.len()]);
            for (i, &row) in rows.iter().enumerate() {
                old.set(i, column.at(row)?)?;
            }
            let result = f.call(ctx, Some(&Value::Array(old)), &Value::Array(replacement))?;
            let result = match result {
                Value::Array(a) => a,
                other => {
                    return Err(AplError::type_mismatch(format!(
                        "modifier returned {} instead of an array",
                        other.type_name()
                    )))
                }
            };
            if result.rank() != 1 || result.size() != rows.len() {
                return Err(AplError::non_conformant(format!(
                    "modifier returned shape {:?}, expected [{}]",
                    result.shape(),
                    rows.len()
                )));
            }
            result
                .unify(true)
                .ok_or_else(|| AplError::type_mismatch("modified values cannot be unified"))?
        }
        None => replacement,
    };

    if replacement.element_type() == column.element_type() {
        let mut merged = column.clone();
        for (i, &row) in rows.iter().enumerate() {
            merged.set(row, replacement.at(i)?)?;
        }
        return Ok(merged);
    }

    tracing::debug!(
        from = %column.element_type(),
        with = %replacement.element_type(),
        "rebuilding table column"
    );
    let mut values = column.values();
    for (i, &row) in rows.iter().enumerate() {
        let slot = values
            .get_mut(row)
            .ok_or_else(|| AplError::index_out_of_range(row as i64, column.size()))?;
        *slot = replacement.at(i)?;
    }
    // Numeric columns promote: an int column receiving a float becomes a
    // float column. Only values with no common uniform type fail.
    ArrayValue::mixed_vector(values).unify(false).ok_or_else(|| {
        AplError::type_mismatch(format!(
            "cannot store {} values in {} column",
            replacement.element_type(),
            column.element_type()
        ))
    })
}
