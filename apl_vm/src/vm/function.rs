//! Callable functions.
//!
//! Primitives resolved from the registry, operator-derived functions and the
//! modifier of a modified assignment all implement [`Function`]. A function
//! is called monadically with `left == None`.

use std::fmt;
use std::rc::Rc;

use super::error::AplResult;
use super::value::Value;
use crate::session::Context;

/// A monadic or dyadic function over values.
pub trait Function: fmt::Debug {
    fn call(&self, ctx: &Context, left: Option<&Value>, right: &Value) -> AplResult<Value>;
}

/// Shared handle to a function.
pub type FunctionRef = Rc<dyn Function>;

/// Signature of a plain native function.
pub type NativeFn = fn(&Context, Option<&Value>, &Value) -> AplResult<Value>;

/// Function backed by a plain function pointer.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    name: &'static str,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, func: NativeFn) -> Self {
        Self { name, func }
    }

    /// Wrap into a shared [`FunctionRef`].
    pub fn into_ref(self) -> FunctionRef {
        Rc::new(self)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFunction").field(&self.name).finish()
    }
}

impl Function for NativeFunction {
    fn call(&self, ctx: &Context, left: Option<&Value>, right: &Value) -> AplResult<Value> {
        (self.func)(ctx, left, right)
    }
}
