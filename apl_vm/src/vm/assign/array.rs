//! Elementwise indexed assignment into arrays.

// The i64→usize cast in `write_at` happens after offsets below zero have
// been handled.
#![allow(clippy::cast_sign_loss)]

use crate::session::Context;
use crate::vm::convert::IndexArray;
use crate::vm::error::{AplError, AplResult, ErrorKind};
use crate::vm::function::Function;
use crate::vm::shape::collapse;
use crate::vm::value::{ArrayValue, Value};

/// Offset marking a position that is skipped.
const SKIP: i64 = -1;

/// Write `r` into `target` at the flat offsets of `idx`.
///
/// A scalar or single-element `r` is broadcast to every offset. Otherwise the
/// shapes of `idx` and `r` must agree after dropping unit axes, and elements
/// are written pairwise in row-major order. On failure the positions written
/// so far stay written.
pub fn update_array(
    ctx: &Context,
    target: &mut ArrayValue,
    idx: &IndexArray,
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    let source = match r {
        Value::Array(a) if a.size() != 1 => a,
        Value::Array(a) => {
            let scalar = a.at(0)?;
            return broadcast(ctx, target, idx, modifier, &scalar);
        }
        scalar => return broadcast(ctx, target, idx, modifier, scalar),
    };

    let ds = collapse(idx.shape());
    let ss = collapse(source.shape());
    if ds != ss {
        return Err(AplError::non_conformant(format!(
            "index shape {:?} does not conform to value shape {:?}",
            idx.shape(),
            source.shape()
        )));
    }
    for (i, &offset) in idx.ints().iter().enumerate() {
        write_at(ctx, target, offset, source.at(i)?, modifier)?;
    }
    Ok(())
}

fn broadcast(
    ctx: &Context,
    target: &mut ArrayValue,
    idx: &IndexArray,
    modifier: Option<&dyn Function>,
    value: &Value,
) -> AplResult<()> {
    for &offset in idx.ints() {
        write_at(ctx, target, offset, value.clone(), modifier)?;
    }
    Ok(())
}

/// Store one value, upgrading a uniform target once if it cannot hold it.
fn write_at(
    ctx: &Context,
    target: &mut ArrayValue,
    offset: i64,
    value: Value,
    modifier: Option<&dyn Function>,
) -> AplResult<()> {
    if offset == SKIP {
        return Ok(());
    }
    if offset < SKIP {
        return Err(AplError::index_out_of_range(offset, target.size()));
    }
    let offset = offset as usize;
    let value = match modifier {
        Some(f) => {
            let old = target.at(offset)?;
            f.call(ctx, Some(&old), &value)?
        }
        None => value,
    };
    match target.set(offset, value.clone()) {
        Err(e) if e.kind() == ErrorKind::TypeMismatch && target.is_uniform() => {
            *target = target.upgrade();
            target.set(offset, value)
        }
        other => other,
    }
}
