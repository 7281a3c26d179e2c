//! Container value types.
//!
//! This module contains the nested container types of the value model:
//! - `DictKey`, `DictValue`: ordered key→value store backing objects and tables
//! - `TableValue`: column store of uniform rank-1 arrays
//! - `ListValue`: depth-nested sequence
//! - `AxisValue`: argument packaged with an axis specification

use std::collections::HashMap;

use super::super::error::{AplError, AplResult};
use super::array_value::ArrayValue;
use super::Value;

/// Dictionary key: supports Str, Int or Bool
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum DictKey {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl DictKey {
    pub fn from_value(v: &Value) -> AplResult<Self> {
        match v {
            Value::Str(s) => Ok(DictKey::Str(s.clone())),
            Value::Int(i) => Ok(DictKey::Int(*i)),
            Value::Bool(b) => Ok(DictKey::Bool(*b)),
            other => Err(AplError::type_mismatch(format!(
                "{} cannot be used as a key",
                other.type_name()
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            DictKey::Str(s) => Value::Str(s.clone()),
            DictKey::Int(i) => Value::Int(*i),
            DictKey::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for DictKey {
    fn from(s: &str) -> Self {
        DictKey::Str(s.to_string())
    }
}

impl std::fmt::Display for DictKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictKey::Str(s) => write!(f, "{}", s),
            DictKey::Int(i) => write!(f, "{}", i),
            DictKey::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Ordered dictionary.
///
/// Invariant: `keys` and `map` hold the same set of keys; `keys` keeps
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct DictValue<V = Value> {
    keys: Vec<DictKey>,
    map: HashMap<DictKey, V>,
}

impl<V> Default for DictValue<V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            map: HashMap::new(),
        }
    }
}

impl<V> DictValue<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries in order. Later duplicates overwrite earlier values.
    pub fn with_entries(entries: Vec<(DictKey, V)>) -> Self {
        let mut dict = Self::new();
        for (k, v) in entries {
            dict.set(k, v);
        }
        dict
    }

    /// Keys in insertion order
    pub fn keys(&self) -> &[DictKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn at(&self, key: &DictKey) -> Option<&V> {
        self.map.get(key)
    }

    /// Key at insertion position `pos`
    pub fn key_at(&self, pos: usize) -> Option<&DictKey> {
        self.keys.get(pos)
    }

    pub fn position(&self, key: &DictKey) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Insert or replace. Unknown keys are appended to the key order.
    pub fn set(&mut self, key: DictKey, value: V) {
        if !self.map.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.map.insert(key, value);
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&DictKey, &V)> {
        self.keys.iter().filter_map(|k| self.map.get(k).map(|v| (k, v)))
    }
}

/// Table: ordered key → column mapping plus an explicit row count.
///
/// Invariant: every column is a uniform rank-1 array of `rows` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TableValue {
    columns: DictValue<ArrayValue>,
    rows: usize,
}

impl TableValue {
    /// Empty table with a fixed row count
    pub fn new(rows: usize) -> Self {
        Self {
            columns: DictValue::new(),
            rows,
        }
    }

    /// Build from columns; the row count is taken from the first column.
    pub fn from_columns(columns: Vec<(DictKey, ArrayValue)>) -> AplResult<Self> {
        let rows = columns.first().map_or(0, |(_, c)| c.size());
        let mut table = Self::new(rows);
        for (key, column) in columns {
            table.set_column(key, column)?;
        }
        Ok(table)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn keys(&self) -> &[DictKey] {
        self.columns.keys()
    }

    pub fn column(&self, key: &DictKey) -> Option<&ArrayValue> {
        self.columns.at(key)
    }

    /// Borrow the backing dictionary
    pub fn columns(&self) -> &DictValue<ArrayValue> {
        &self.columns
    }

    /// Insert or replace a column.
    pub fn set_column(&mut self, key: DictKey, column: ArrayValue) -> AplResult<()> {
        if column.rank() != 1 || column.size() != self.rows {
            return Err(AplError::non_conformant(format!(
                "column has shape {:?}, table has {} rows",
                column.shape(),
                self.rows
            ))
            .with_context(key.to_string()));
        }
        if !column.is_uniform() {
            return Err(AplError::type_mismatch("table columns must be uniform")
                .with_context(key.to_string()));
        }
        self.columns.set(key, column);
        Ok(())
    }
}

/// Ordered sequence of values addressed by depth paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListValue {
    items: Vec<Value>,
}

impl ListValue {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Value at a 0-based depth path. Each step but the last descends into a
    /// nested list.
    pub fn get_deep(&self, path: &[usize]) -> AplResult<Value> {
        let (&first, rest) = path
            .split_first()
            .ok_or_else(|| AplError::index_out_of_range(0, 0))?;
        let item = self
            .items
            .get(first)
            .ok_or_else(|| AplError::index_out_of_range(first as i64, self.items.len()))?;
        if rest.is_empty() {
            return Ok(item.clone());
        }
        match item {
            Value::List(inner) => inner.get_deep(rest),
            other => Err(AplError::type_mismatch(format!(
                "cannot index into {} at depth",
                other.type_name()
            ))),
        }
    }

    /// Replace the value at a 0-based depth path.
    pub fn set_deep(&mut self, path: &[usize], value: Value) -> AplResult<()> {
        let (&first, rest) = path
            .split_first()
            .ok_or_else(|| AplError::index_out_of_range(0, 0))?;
        let len = self.items.len();
        let item = self
            .items
            .get_mut(first)
            .ok_or_else(|| AplError::index_out_of_range(first as i64, len))?;
        if rest.is_empty() {
            *item = value;
            return Ok(());
        }
        match item {
            Value::List(inner) => inner.set_deep(rest, value),
            other => Err(AplError::type_mismatch(format!(
                "cannot index into {} at depth",
                other.type_name()
            ))),
        }
    }
}

/// An argument packaged with an axis specification, e.g. `⌽[1]R`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisValue {
    pub value: Box<Value>,
    pub axis: Box<Value>,
}

impl AxisValue {
    pub fn new(value: Value, axis: Value) -> Self {
        Self {
            value: Box::new(value),
            axis: Box::new(axis),
        }
    }
}
