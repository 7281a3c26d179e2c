//! Integration tests: reverse and rotate through the registry

mod common;
use common::*;

use pretty_assertions::assert_eq;

use apl_vm::vm::function::Function;
use apl_vm::vm::value::{ArrayValue, AxisValue};
use apl_vm::{Context, ErrorKind, Value};

fn call(ctx: &Context, symbol: &str, left: Option<&Value>, right: &Value) -> apl_vm::AplResult<Value> {
    ctx.registry().primitive(symbol)?.call(ctx, left, right)
}

// ==================== Reverse ====================

#[test]
fn test_reverse_rank_three_each_axis() {
    let ctx = ctx();
    let cube = matrix(&[0, 1, 2, 3, 4, 5, 6, 7], &[2, 2, 2]);
    assert_eq!(
        call(&ctx, "⌽", None, &cube).unwrap(),
        matrix(&[1, 0, 3, 2, 5, 4, 7, 6], &[2, 2, 2])
    );
    assert_eq!(
        call(&ctx, "⊖", None, &cube).unwrap(),
        matrix(&[4, 5, 6, 7, 0, 1, 2, 3], &[2, 2, 2])
    );
    let middle = Value::Axis(AxisValue::new(cube, Value::Int(2)));
    assert_eq!(
        call(&ctx, "⌽", None, &middle).unwrap(),
        matrix(&[2, 3, 0, 1, 6, 7, 4, 5], &[2, 2, 2])
    );
}

#[test]
fn test_reverse_keeps_storage_variant() {
    let ctx = ctx();
    let mixed = Value::Array(ArrayValue::mixed_vector(vec![
        Value::Int(1),
        Value::Str("a".into()),
    ]));
    let Value::Array(out) = call(&ctx, "⌽", None, &mixed).unwrap() else {
        panic!("reverse of an array is an array");
    };
    assert!(!out.is_uniform());
    assert_eq!(out.values(), vec![Value::Str("a".into()), Value::Int(1)]);
}

#[test]
fn test_reverse_axis_with_origin_zero() {
    let mut ctx = ctx();
    ctx.set_origin(0).unwrap();
    let m = matrix(&[1, 2, 3, 4, 5, 6], &[2, 3]);
    let first = Value::Axis(AxisValue::new(m, Value::Int(0)));
    assert_eq!(
        call(&ctx, "⌽", None, &first).unwrap(),
        matrix(&[4, 5, 6, 1, 2, 3], &[2, 3])
    );
}

#[test]
fn test_explicit_axis_below_origin_is_out_of_range() {
    let ctx = ctx();
    let m = matrix(&[1, 2, 3, 4, 5, 6], &[2, 3]);
    let zero = Value::Axis(AxisValue::new(m, Value::Int(0)));
    let err = call(&ctx, "⌽", None, &zero).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AxisOutOfRange);
    let err = call(&ctx, "⊖", Some(&Value::Int(1)), &zero).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AxisOutOfRange);
}

#[test]
fn test_reverse_rejects_two_axes() {
    let ctx = ctx();
    let r = Value::Axis(AxisValue::new(matrix(&[1, 2, 3, 4], &[2, 2]), ints(&[1, 2])));
    let err = call(&ctx, "⌽", None, &r).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAxis);
}

// ==================== Rotate ====================

#[test]
fn test_rotate_first_axis_by_matrix_of_amounts() {
    let ctx = ctx();
    let cube = matrix(&[0, 1, 2, 3, 4, 5, 6, 7], &[2, 2, 2]);
    let amounts = matrix(&[1, 0, 0, 1], &[2, 2]);
    assert_eq!(
        call(&ctx, "⊖", Some(&amounts), &cube).unwrap(),
        matrix(&[4, 1, 2, 7, 0, 5, 6, 3], &[2, 2, 2])
    );
}

#[test]
fn test_rotate_negative_amount() {
    let ctx = ctx();
    let v = ints(&[1, 2, 3, 4]);
    assert_eq!(
        call(&ctx, "⌽", Some(&Value::Int(-3)), &v).unwrap(),
        ints(&[2, 3, 4, 1])
    );
}

#[test]
fn test_rotate_amount_given_as_float_array() {
    let ctx = ctx();
    let amounts = Value::Array(ArrayValue::float_vector(vec![1.0, 2.0]));
    let m = matrix(&[1, 2, 3, 4, 5, 6], &[2, 3]);
    assert_eq!(
        call(&ctx, "⌽", Some(&amounts), &m).unwrap(),
        matrix(&[2, 3, 1, 6, 4, 5], &[2, 3])
    );
}

#[test]
fn test_rotate_empty_matrix() {
    let ctx = ctx();
    let empty = matrix(&[], &[0, 3]);
    assert_eq!(call(&ctx, "⌽", Some(&Value::Int(2)), &empty).unwrap(), empty);
}

#[test]
fn test_rotate_mismatched_amounts() {
    let ctx = ctx();
    let m = matrix(&[1, 2, 3, 4, 5, 6], &[2, 3]);
    let err = call(&ctx, "⊖", Some(&ints(&[1, 1])), &m).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NonConformant);
}

#[test]
fn test_rotate_string_amount_has_no_handle() {
    let ctx = ctx();
    let err = call(&ctx, "⌽", Some(&Value::Str("x".into())), &ints(&[1])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainError);
}

// ==================== Registry ====================

#[test]
fn test_later_handles_are_tried_first() {
    use apl_vm::session::FunctionHandle;
    use std::rc::Rc;

    fn shout(_: &Context, _: Option<&Value>, r: &Value) -> apl_vm::AplResult<Option<Value>> {
        match r {
            Value::Str(s) => Ok(Some(Value::Str(s.to_uppercase()))),
            _ => Ok(None),
        }
    }

    let mut registry = registry();
    registry.register_primitive("⌽", FunctionHandle::monadic("⌽S  upper-case a string", shout));
    let ctx = Context::new(Rc::new(registry));
    assert_eq!(
        call(&ctx, "⌽", None, &Value::Str("ab".into())).unwrap(),
        Value::Str("AB".into())
    );
    assert_eq!(call(&ctx, "⌽", None, &ints(&[1, 2])).unwrap(), ints(&[2, 1]));
    assert!(ctx.registry().doc("⌽").unwrap().contains("upper-case"));
}
