//! Assignment engine.
//!
//! Scalar, vector, modified and indexed assignment over every value kind.
//! Indexed assignment decodes its index array once into a [`Selector`] and
//! dispatches on the kind of the bound value:
//!
//! - **Array**: elementwise update with upgrade to mixed storage on demand
//! - **Table**: row/column update (`table`)
//! - **Object**: keyed or depth update (`object`)
//! - **List**: depth update
//!
//! Selective assignment `(f A)←R` maps a selective primitive over the
//! offsets of `A` and reuses the elementwise update (`selective`).
//!
//! Errors carry the name of the variable they concern. When a multi-position
//! write fails part way, the positions already written stay written.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod array;
mod object;
mod selective;
mod selector;
mod table;

pub use array::update_array;
pub use object::{descend, update_keys, update_list};
pub use selective::{execute_selective, Selection};
pub use selector::{DepthPath, Selector};
pub use table::update_table;

use crate::session::Context;
use crate::vm::convert::{to_index_array, IndexArray};
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::{Function, FunctionRef};
use crate::vm::value::{ArrayValue, Value};

/// Index argument of an indexed assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Indexes {
    /// Index array as produced by the index primitive
    Descriptor(IndexArray),
    /// Any value that converts to an index array
    Value(Value),
}

impl Indexes {
    pub fn to_index_array(&self) -> AplResult<IndexArray> {
        match self {
            Indexes::Descriptor(idx) => Ok(idx.clone()),
            Indexes::Value(v) => to_index_array(v),
        }
    }
}

impl From<IndexArray> for Indexes {
    fn from(idx: IndexArray) -> Self {
        Indexes::Descriptor(idx)
    }
}

impl From<Value> for Indexes {
    fn from(v: Value) -> Self {
        Indexes::Value(v)
    }
}

/// Target of an assignment. Vector and indexed assignment are exclusive.
#[derive(Debug, Clone)]
pub enum Assignment {
    Scalar {
        name: String,
        indexes: Option<Indexes>,
        modifier: Option<FunctionRef>,
    },
    Vector {
        names: Vec<String>,
        modifier: Option<FunctionRef>,
    },
}

impl Assignment {
    /// Plain `name←R`
    pub fn name(name: &str) -> Self {
        Assignment::Scalar {
            name: name.to_string(),
            indexes: None,
            modifier: None,
        }
    }

    /// `name[idx]←R`
    pub fn indexed(name: &str, indexes: impl Into<Indexes>) -> Self {
        Assignment::Scalar {
            name: name.to_string(),
            indexes: Some(indexes.into()),
            modifier: None,
        }
    }

    /// `(a b c)←R`
    pub fn names(names: &[&str]) -> Self {
        Assignment::Vector {
            names: names.iter().map(|n| n.to_string()).collect(),
            modifier: None,
        }
    }

    /// Same target, with `f` applied as `f(old, R)` before storing.
    pub fn with_modifier(self, f: FunctionRef) -> Self {
        match self {
            Assignment::Scalar { name, indexes, .. } => Assignment::Scalar {
                name,
                indexes,
                modifier: Some(f),
            },
            Assignment::Vector { names, .. } => Assignment::Vector {
                names,
                modifier: Some(f),
            },
        }
    }
}

/// Perform `assignment` with right argument `r`. The result is `r`.
pub fn execute(ctx: &mut Context, assignment: &Assignment, r: Value) -> AplResult<Value> {
    match assignment {
        Assignment::Scalar {
            name,
            indexes,
            modifier,
        } => assign_scalar(ctx, name, indexes.as_ref(), modifier.as_deref(), &r)?,
        Assignment::Vector { names, modifier } => {
            assign_vector(ctx, names, &r, modifier.as_deref())?
        }
    }
    Ok(r)
}

/// Assign the elements of `r` to `names`.
///
/// `r` must be a vector of one element, broadcast to every name, or of one
/// element per name. A non-array `r` counts as a one-element vector. When a
/// name fails, the names before it keep their new values.
#[tracing::instrument(level = "debug", skip_all, fields(count = names.len()))]
pub fn assign_vector(
    ctx: &mut Context,
    names: &[String],
    r: &Value,
    modifier: Option<&dyn Function>,
) -> AplResult<()> {
    let values = match r {
        Value::Array(a) => a.clone(),
        other => ArrayValue::mixed_vector(vec![other.clone()]).unify_or_keep(),
    };
    if values.rank() != 1 {
        return Err(AplError::non_conformant(format!(
            "vector assignment needs a vector, got rank {}",
            values.rank()
        )));
    }
    let n = values.size();
    if n != 1 && n != names.len() {
        return Err(AplError::non_conformant(format!(
            "{} values for {} names",
            n,
            names.len()
        )));
    }
    for (i, name) in names.iter().enumerate() {
        let v = values.at(if n == 1 { 0 } else { i })?;
        assign_scalar(ctx, name, None, modifier, &v)?;
    }
    Ok(())
}

/// Assign to a single name, optionally indexed and/or modified.
///
/// Without indexes and modifier this is a plain bind. Otherwise `name` must
/// be bound; the updated value is stored into the scope that owns it.
#[tracing::instrument(level = "debug", skip_all, fields(name = name))]
pub fn assign_scalar(
    ctx: &mut Context,
    name: &str,
    indexes: Option<&Indexes>,
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    if indexes.is_none() && modifier.is_none() {
        ctx.assign(name, r.clone());
        return Ok(());
    }
    let (current, scope) = ctx
        .lookup_env(name)
        .map(|(v, scope)| (v.clone(), scope))
        .ok_or_else(|| AplError::UndefinedVariable(name.to_string()))?;

    let mut target = current;
    let outcome = match (indexes, modifier) {
        (Some(indexes), modifier) => update_value(ctx, &mut target, indexes, modifier, r),
        (None, Some(f)) => f.call(ctx, Some(&target), r).map(|v| target = v),
        (None, None) => Ok(()),
    };
    ctx.assign_env(name, target, scope);
    outcome.map_err(|e| e.with_context(name))
}

/// Indexed update of `target` in place.
pub fn update_value(
    ctx: &Context,
    target: &mut Value,
    indexes: &Indexes,
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    let idx = indexes.to_index_array()?;
    let selector = Selector::decode(target, &idx, ctx.origin())?;
    apply(ctx, target, selector, modifier, r)
}

/// Apply a decoded selector to `target`.
pub(crate) fn apply(
    ctx: &Context,
    target: &mut Value,
    selector: Selector,
    modifier: Option<&dyn Function>,
    r: &Value,
) -> AplResult<()> {
    match (target, selector) {
        (Value::Array(a), Selector::Flat(idx)) => update_array(ctx, a, &idx, modifier, r),
        (Value::Table(t), Selector::TableCell { rows, cols }) => {
            update_table(ctx, t, &rows, &cols, modifier, r)
        }
        (Value::Object(o), Selector::ObjectDepth(DepthPath::Keys(positions))) => {
            update_keys(ctx, o, &positions, modifier, r)
        }
        (Value::Object(o), Selector::ObjectDepth(DepthPath::Descend { position, rest })) => {
            descend(ctx, o, position, *rest, modifier, r)
        }
        (Value::List(l), Selector::ObjectDepth(DepthPath::List(path))) => {
            update_list(ctx, l, &path, modifier, r)
        }
        (target, selector) => Err(AplError::NotSettable(format!(
            "{} cannot take {:?}",
            target.type_name(),
            selector
        ))),
    }
}
