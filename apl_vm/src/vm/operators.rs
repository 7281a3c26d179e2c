//! Built-in operators.
//!
//! `f⍨` commutes the arguments of `f`: `L f⍨ R` is `R f L` and `f⍨ R` is
//! `R f R`.

use std::rc::Rc;

use crate::session::{Context, Operator, Registry};
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::{Function, FunctionRef};
use crate::vm::value::Value;

/// The `⍨` operator.
#[derive(Debug)]
pub struct Commute;

#[derive(Debug)]
struct Commuted {
    f: FunctionRef,
}

impl Function for Commuted {
    fn call(&self, ctx: &Context, left: Option<&Value>, right: &Value) -> AplResult<Value> {
        let left = left.unwrap_or(right);
        self.f.call(ctx, Some(right), left)
    }
}

impl Operator for Commute {
    fn derive(&self, left: FunctionRef, right: Option<FunctionRef>) -> AplResult<FunctionRef> {
        if right.is_some() {
            return Err(AplError::domain("⍨ takes a single operand"));
        }
        Ok(Rc::new(Commuted { f: left }))
    }
}

/// Install the built-in operators.
pub fn register(registry: &mut Registry) {
    registry.register_operator("⍨", Rc::new(Commute));
    registry.register_doc("⍨", "f⍨  commute: L f⍨ R is R f L, f⍨ R is R f R");
}
