//! Keyed and depth update of objects and lists.

use crate::session::Context;
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::Function;
use crate::vm::value::{DictValue, ListValue, Value};

use super::{apply, Selector};

/// Write `r` to the keys at `positions`.
///
/// With more than one key an array `r` holding one element per key is
/// distributed element by element. Otherwise every key receives `r` whole.
pub fn update_keys(
    ctx: &Context,
    obj: &mut DictValue<Value>,
    positions: &[usize],
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    let spread = match r {
        Value::Array(a) if positions.len() > 1 && a.size() == positions.len() => Some(a),
        _ => None,
    };
    for (i, &pos) in positions.iter().enumerate() {
        let key = obj
            .key_at(pos)
            .cloned()
            .ok_or_else(|| AplError::index_out_of_range(pos as i64, obj.len()))?;
        let value = match spread {
            Some(a) => a.at(i)?,
            None => r.clone(),
        };
        let value = match (modifier, obj.at(&key)) {
            (Some(f), Some(old)) => f
                .call(ctx, Some(old), &value)
                .map_err(|e| e.with_context(key.to_string()))?,
            _ => value,
        };
        obj.set(key, value);
    }
    Ok(())
}

/// Apply `rest` to the value at key `position` and store it back.
///
/// The nested value is written back even when `rest` fails part way.
pub fn descend(
    ctx: &Context,
    obj: &mut DictValue<Value>,
    position: usize,
    rest: Selector,
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    let key = obj
        .key_at(position)
        .cloned()
        .ok_or_else(|| AplError::index_out_of_range(position as i64, obj.len()))?;
    let mut nested = obj
        .at(&key)
        .cloned()
        .ok_or_else(|| AplError::key_mismatch(format!("no value for {key}")))?;
    if let Value::Table(_) = nested {
        return Err(AplError::UnsupportedDepth(
            "tables are not supported at depth".to_string(),
        ));
    }
    let outcome = apply(ctx, &mut nested, rest, modifier, r);
    obj.set(key.clone(), nested);
    outcome.map_err(|e| e.with_context(key.to_string()))
}

/// Depth update of a list: `mod(old, r)` when a modifier is given, then
/// replace the value at `path`.
pub fn update_list(
    ctx: &Context,
    list: &mut ListValue,
    path: &[usize],
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    let value = match modifier {
        Some(f) => {
            let old = list.get_deep(path)?;
            f.call(ctx, Some(&old), r)?
        }
        None => r.clone(),
    };
    list.set_deep(path, value)
}
