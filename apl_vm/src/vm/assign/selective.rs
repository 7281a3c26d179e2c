//! Selective assignment `(f A)←R`.
//!
//! A selective primitive is run over the flat offsets of `A` instead of its
//! elements. The offsets it returns drive an ordinary elementwise update, so
//! `R` lands where `f` would have taken its elements from.

use crate::session::{Context, Primitive};
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::FunctionRef;
use crate::vm::value::Value;

use super::{execute, Assignment};

/// Target of a selective assignment: the primitive with its optional left
/// argument and axis.
#[derive(Debug, Clone)]
pub struct Selection {
    pub primitive: Primitive,
    pub left: Option<Value>,
    pub axis: Option<Value>,
}

impl Selection {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            left: None,
            axis: None,
        }
    }

    pub fn with_left(self, left: Value) -> Self {
        Self {
            left: Some(left),
            ..self
        }
    }

    pub fn with_axis(self, axis: Value) -> Self {
        Self {
            axis: Some(axis),
            ..self
        }
    }
}

/// Assign `r` to `name` through the positions `selection` picks. The result
/// is `r`.
#[tracing::instrument(level = "debug", skip_all, fields(name = name, symbol = selection.primitive.symbol()))]
pub fn execute_selective(
    ctx: &mut Context,
    name: &str,
    selection: &Selection,
    modifier: Option<FunctionRef>,
    r: Value,
) -> AplResult<Value> {
    let shape = match ctx.lookup(name) {
        Some(Value::Array(a)) => a.shape().to_vec(),
        Some(other) => {
            return Err(AplError::NotSettable(format!(
                "{} cannot take a selection",
                other.type_name()
            ))
            .with_context(name))
        }
        None => return Err(AplError::UndefinedVariable(name.to_string())),
    };
    let idx = selection
        .primitive
        .select(
            ctx,
            selection.left.as_ref(),
            &shape,
            selection.axis.as_ref(),
        )
        .map_err(|e| e.with_context(name))?;
    let assignment = Assignment::indexed(name, idx);
    let assignment = match modifier {
        Some(f) => assignment.with_modifier(f),
        None => assignment,
    };
    execute(ctx, &assignment, r)
}
