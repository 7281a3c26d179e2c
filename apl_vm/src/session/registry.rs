//! Symbol tables consumed by the evaluator.
//!
//! The host builds a [`Registry`] once and shares it into every session.
//! A symbol may carry several function handles for different argument
//! domains; the last registered handle is tried first.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::vm::convert::{to_index_array, IndexArray};
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::{Function, FunctionRef};
use crate::vm::value::{ArrayValue, AxisValue, Value};

use super::Context;

/// Handle body. Returns `Ok(None)` when the arguments are outside its domain.
pub type HandleFn = fn(&Context, Option<&Value>, &Value) -> AplResult<Option<Value>>;

/// Number of arguments a handle accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Monadic,
    Dyadic,
}

impl Arity {
    fn accepts(self, left: Option<&Value>) -> bool {
        match self {
            Arity::Monadic => left.is_none(),
            Arity::Dyadic => left.is_some(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct FunctionHandle {
    pub doc: &'static str,
    pub arity: Arity,
    pub func: HandleFn,
    /// The handle only rearranges elements, so it may stand on the left of
    /// `←` as in `(⌽A)←R`.
    pub selective: bool,
}

impl fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionHandle")
            .field("doc", &self.doc)
            .field("arity", &self.arity)
            .field("selective", &self.selective)
            .finish_non_exhaustive()
    }
}

impl FunctionHandle {
    pub fn monadic(doc: &'static str, func: HandleFn) -> Self {
        Self {
            doc,
            arity: Arity::Monadic,
            func,
            selective: false,
        }
    }

    pub fn dyadic(doc: &'static str, func: HandleFn) -> Self {
        Self {
            doc,
            arity: Arity::Dyadic,
            func,
            selective: false,
        }
    }

    /// Mark the handle as usable in selective assignment.
    pub fn selective(self) -> Self {
        Self {
            selective: true,
            ..self
        }
    }
}

/// Derives a function from one or two operand functions.
pub trait Operator: fmt::Debug {
    fn derive(&self, left: FunctionRef, right: Option<FunctionRef>) -> AplResult<FunctionRef>;
}

/// A primitive symbol resolved against the registry.
#[derive(Debug, Clone)]
pub struct Primitive {
    symbol: String,
    handles: Vec<FunctionHandle>,
}

impl Primitive {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Flat offsets of an array of `shape` in the order this primitive
    /// arranges its elements.
    ///
    /// The first selective handle that accepts the arguments runs over the
    /// offsets `0..size` laid out in `shape`, wrapped with `axis` if given.
    pub fn select(
        &self,
        ctx: &Context,
        left: Option<&Value>,
        shape: &[usize],
        axis: Option<&Value>,
    ) -> AplResult<IndexArray> {
        let offsets = IndexArray::offsets(shape);
        if offsets.is_empty() {
            return Ok(offsets);
        }
        let mut right = Value::Array(ArrayValue::try_from(offsets)?);
        if let Some(axis) = axis {
            right = Value::Axis(AxisValue::new(right, axis.clone()));
        }
        for handle in self.handles.iter().rev() {
            if !handle.selective || !handle.arity.accepts(left) {
                continue;
            }
            if let Some(selected) = (handle.func)(ctx, left, &right)? {
                tracing::trace!(symbol = %self.symbol, handle = handle.doc, "selected");
                return to_index_array(&selected);
            }
        }
        Err(AplError::domain(format!(
            "{}: cannot be used in selective assignment",
            self.symbol
        )))
    }
}

impl Function for Primitive {
    fn call(&self, ctx: &Context, left: Option<&Value>, right: &Value) -> AplResult<Value> {
        for handle in self.handles.iter().rev() {
            if !handle.arity.accepts(left) {
                continue;
            }
            if let Some(result) = (handle.func)(ctx, left, right)? {
                tracing::trace!(symbol = %self.symbol, handle = handle.doc, "dispatched");
                return Ok(result);
            }
        }
        let arity = if left.is_some() { "dyadic" } else { "monadic" };
        Err(AplError::domain(format!(
            "{}: no {} handle accepts {}",
            self.symbol,
            arity,
            right.type_name()
        )))
    }
}

/// Primitive handles, operators and documentation by symbol.
#[derive(Debug, Default)]
pub struct Registry {
    primitives: HashMap<String, Vec<FunctionHandle>>,
    operators: HashMap<String, Rc<dyn Operator>>,
    docs: HashMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handle for `symbol`. The handle's doc line is appended to the
    /// symbol's documentation.
    pub fn register_primitive(&mut self, symbol: &str, handle: FunctionHandle) {
        self.primitives
            .entry(symbol.to_string())
            .or_default()
            .push(handle);
        self.register_doc(symbol, handle.doc);
    }

    pub fn register_operator(&mut self, symbol: &str, operator: Rc<dyn Operator>) {
        self.operators.insert(symbol.to_string(), operator);
    }

    /// Append help text for `key`, one line per call.
    pub fn register_doc(&mut self, key: &str, help: &str) {
        let entry = self.docs.entry(key.to_string()).or_default();
        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(help);
    }

    pub fn doc(&self, key: &str) -> Option<&str> {
        self.docs.get(key).map(String::as_str)
    }

    /// Resolve `symbol` into a callable primitive.
    pub fn primitive(&self, symbol: &str) -> AplResult<Primitive> {
        let handles = self
            .primitives
            .get(symbol)
            .ok_or_else(|| AplError::UnknownSymbol(symbol.to_string()))?;
        Ok(Primitive {
            symbol: symbol.to_string(),
            handles: handles.clone(),
        })
    }

    pub fn operator(&self, symbol: &str) -> AplResult<Rc<dyn Operator>> {
        self.operators
            .get(symbol)
            .cloned()
            .ok_or_else(|| AplError::UnknownSymbol(symbol.to_string()))
    }

    /// Registered primitive and operator symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self
            .primitives
            .keys()
            .chain(self.operators.keys())
            .map(String::as_str)
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }
}
