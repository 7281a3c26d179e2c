//! Shared helpers for integration tests
// Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use std::rc::Rc;

use apl_vm::session::FunctionHandle;
use apl_vm::vm::value::{ArrayValue, DictKey, DictValue, TableValue};
use apl_vm::{operators, primitives, AplError, AplResult, Context, Registry, Value};

/// Scalar and elementwise integer addition, for modified assignment.
fn plus(_: &Context, l: Option<&Value>, r: &Value) -> AplResult<Option<Value>> {
    let Some(l) = l else {
        return Ok(Some(r.clone()));
    };
    let sum = match (l, r) {
        (Value::Int(a), Value::Int(b)) => Value::Int(a + b),
        (Value::Array(a), Value::Array(b)) if a.size() == b.size() => {
            let values = a
                .values()
                .into_iter()
                .zip(b.values())
                .map(|(x, y)| match (x, y) {
                    (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x + y)),
                    _ => Err(AplError::domain("+ needs integers")),
                })
                .collect::<AplResult<Vec<_>>>()?;
            Value::Array(ArrayValue::mixed_vector(values).unify_or_keep())
        }
        _ => return Ok(None),
    };
    Ok(Some(sum))
}

/// Registry with the built-in primitives and operators plus `+`.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    primitives::register(&mut registry);
    operators::register(&mut registry);
    registry.register_primitive("+", FunctionHandle::monadic("+R  identity", plus));
    registry.register_primitive("+", FunctionHandle::dyadic("L+R  add integers", plus));
    registry
}

pub fn ctx() -> Context {
    Context::new(Rc::new(registry()))
}

pub fn ints(v: &[i64]) -> Value {
    Value::Array(ArrayValue::int_vector(v.to_vec()))
}

pub fn matrix(v: &[i64], shape: &[usize]) -> Value {
    Value::Array(ArrayValue::from_ints(v.to_vec(), shape.to_vec()).unwrap())
}

/// Three rows, `a=[1,2,3]`, `b=[4,5,6]`.
pub fn ab_table() -> Value {
    Value::Table(
        TableValue::from_columns(vec![
            (DictKey::from("a"), ArrayValue::int_vector(vec![1, 2, 3])),
            (DictKey::from("b"), ArrayValue::int_vector(vec![4, 5, 6])),
        ])
        .unwrap(),
    )
}

pub fn object(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(DictValue::with_entries(
        entries
            .into_iter()
            .map(|(k, v)| (DictKey::from(k), v))
            .collect(),
    ))
}
