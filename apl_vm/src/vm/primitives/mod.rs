//! Structural primitives and their registry handles.
//!
//! | Symbol | Monadic        | Dyadic         |
//! |--------|----------------|----------------|
//! | `⌽`    | reverse last   | rotate last    |
//! | `⊖`    | reverse first  | rotate first   |
//!
//! Every handle is selective: `(⌽A)←R` and `(L⊖A)←R` assign through the
//! positions the primitive would pick from `A`.
//!
//! Hosts install these with [`register`] and layer their own handles on top.

pub mod axis;
pub mod reverse;
pub mod rotate;

pub use axis::{resolve_axis, split_axis};
pub use reverse::reverse;
pub use rotate::rotate;

use crate::session::{Context, FunctionHandle, Registry};
use crate::vm::convert::to_index_array;
use crate::vm::error::AplResult;
use crate::vm::value::Value;

/// Last axis.
const LAST: i64 = -1;
/// First axis.
const FIRST: i64 = 0;

fn reverse_last(ctx: &Context, _: Option<&Value>, r: &Value) -> AplResult<Option<Value>> {
    reverse(ctx, r, LAST).map(Some)
}

fn reverse_first(ctx: &Context, _: Option<&Value>, r: &Value) -> AplResult<Option<Value>> {
    reverse(ctx, r, FIRST).map(Some)
}

fn rotate_along(
    ctx: &Context,
    left: Option<&Value>,
    r: &Value,
    axis: i64,
) -> AplResult<Option<Value>> {
    let Some(amounts) = left.and_then(|l| to_index_array(l).ok()) else {
        return Ok(None);
    };
    rotate(ctx, &amounts, r, axis).map(Some)
}

fn rotate_last(ctx: &Context, left: Option<&Value>, r: &Value) -> AplResult<Option<Value>> {
    rotate_along(ctx, left, r, LAST)
}

fn rotate_first(ctx: &Context, left: Option<&Value>, r: &Value) -> AplResult<Option<Value>> {
    rotate_along(ctx, left, r, FIRST)
}

/// Install the reverse and rotate handles.
pub fn register(registry: &mut Registry) {
    registry.register_primitive(
        "⌽",
        FunctionHandle::monadic("⌽R  reverse along the last axis", reverse_last).selective(),
    );
    registry.register_primitive(
        "⌽",
        FunctionHandle::dyadic("L⌽R  rotate along the last axis", rotate_last).selective(),
    );
    registry.register_primitive(
        "⊖",
        FunctionHandle::monadic("⊖R  reverse along the first axis", reverse_first).selective(),
    );
    registry.register_primitive(
        "⊖",
        FunctionHandle::dyadic("L⊖R  rotate along the first axis", rotate_first).selective(),
    );
}
