//! Decoding of index arrays into selectors.
//!
//! The index primitive emits a single integer carrier for every target kind.
//! [`Selector::decode`] reads it once against the current target and yields
//! a selector the update functions consume without re-reading the encoding.

// Every i64→usize cast below is preceded by a `< 0` check on the same value.
#![allow(clippy::cast_sign_loss)]

use crate::vm::convert::IndexArray;
use crate::vm::error::{AplError, AplResult};
use crate::vm::value::{DictValue, ListValue, TableValue, Value};

/// Positions selected by an indexed assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Flat offsets into an array; `-1` entries are skipped.
    Flat(IndexArray),
    /// 0-based rows and 0-based column positions into the key order.
    TableCell { rows: Vec<usize>, cols: Vec<usize> },
    /// Keys or a nested path inside objects and lists.
    ObjectDepth(DepthPath),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DepthPath {
    /// 0-based key positions of an object.
    Keys(Vec<usize>),
    /// Descend into the value at key `position` and apply `rest` there.
    Descend {
        position: usize,
        rest: Box<Selector>,
    },
    /// 0-based path through nested lists.
    List(Vec<usize>),
}

impl Selector {
    /// Decode `idx` against the kind of `target`.
    pub fn decode(target: &Value, idx: &IndexArray, origin: i64) -> AplResult<Selector> {
        match target {
            Value::Table(t) => decode_table(t, idx),
            Value::Object(o) => decode_object(o, idx.ints(), origin),
            Value::List(l) => decode_list(l, idx.ints()),
            Value::Array(_) => Ok(Selector::Flat(idx.clone())),
            Value::Int(_)
            | Value::Float(_)
            | Value::Complex(_)
            | Value::Bool(_)
            | Value::Str(_)
            | Value::Axis(_) => Err(AplError::NotSettable(target.type_name().to_string())),
        }
    }
}

fn checked(index: i64, size: usize) -> AplResult<usize> {
    if index < 0 || index as usize >= size {
        return Err(AplError::index_out_of_range(index, size));
    }
    Ok(index as usize)
}

/// The first `shape[0]` entries are rows, the remainder are columns.
fn decode_table(table: &TableValue, idx: &IndexArray) -> AplResult<Selector> {
    let ints = idx.ints();
    let split = idx.shape().first().copied().unwrap_or(0).min(ints.len());
    let rows = ints[..split]
        .iter()
        .map(|&r| checked(r, table.rows()))
        .collect::<AplResult<Vec<_>>>()?;
    let cols = ints[split..]
        .iter()
        .map(|&c| checked(c, table.keys().len()))
        .collect::<AplResult<Vec<_>>>()?;
    Ok(Selector::TableCell { rows, cols })
}

fn decode_object(obj: &DictValue<Value>, ints: &[i64], origin: i64) -> AplResult<Selector> {
    match ints {
        [first, rest @ ..] if *first < 0 && !rest.is_empty() => {
            let position = checked(-1 - first, obj.len())?;
            let nested = obj
                .key_at(position)
                .and_then(|k| obj.at(k))
                .ok_or_else(|| AplError::index_out_of_range(position as i64, obj.len()))?;
            let rest = decode_nested(nested, &IndexArray::vector(rest.to_vec()), origin)?;
            Ok(Selector::ObjectDepth(DepthPath::Descend {
                position,
                rest: Box::new(rest),
            }))
        }
        [single] if *single < 0 => {
            let position = checked(-1 - single, obj.len())?;
            Ok(Selector::ObjectDepth(DepthPath::Keys(vec![position])))
        }
        _ => {
            let positions = ints
                .iter()
                .map(|&i| {
                    checked(i - origin, obj.len())
                        .map_err(|_| AplError::index_out_of_range(i, obj.len()))
                })
                .collect::<AplResult<Vec<_>>>()?;
            Ok(Selector::ObjectDepth(DepthPath::Keys(positions)))
        }
    }
}

/// Nested values reached by a depth step. Tables and scalars cannot be
/// descended into.
fn decode_nested(nested: &Value, rest: &IndexArray, origin: i64) -> AplResult<Selector> {
    match nested {
        Value::Table(_) => Err(AplError::UnsupportedDepth(
            "tables are not supported at depth".to_string(),
        )),
        Value::Object(_) | Value::List(_) | Value::Array(_) => {
            Selector::decode(nested, rest, origin)
        }
        Value::Int(_)
        | Value::Float(_)
        | Value::Complex(_)
        | Value::Bool(_)
        | Value::Str(_)
        | Value::Axis(_) => Err(AplError::UnsupportedDepth(format!(
            "cannot descend into {}",
            nested.type_name()
        ))),
    }
}

fn decode_list(list: &ListValue, ints: &[i64]) -> AplResult<Selector> {
    let path = ints
        .iter()
        .map(|&i| {
            if i < 0 {
                Err(AplError::index_out_of_range(i, list.len()))
            } else {
                Ok(i as usize)
            }
        })
        .collect::<AplResult<Vec<_>>>()?;
    Ok(Selector::ObjectDepth(DepthPath::List(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::value::{ArrayValue, DictKey};

    fn table() -> Value {
        Value::Table(
            TableValue::from_columns(vec![
                ("a".into(), ArrayValue::int_vector(vec![1, 2, 3])),
                ("b".into(), ArrayValue::int_vector(vec![4, 5, 6])),
            ])
            .unwrap(),
        )
    }

    fn object() -> Value {
        let inner = DictValue::with_entries(vec![(DictKey::from("q"), Value::Int(5))]);
        Value::Object(DictValue::with_entries(vec![
            (DictKey::from("p"), Value::Object(inner)),
            (DictKey::from("r"), Value::Int(1)),
        ]))
    }

    // ── table ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_table_split_at_leading_axis() {
        let idx = IndexArray::table_selection(vec![0, 2], vec![1]);
        assert_eq!(
            Selector::decode(&table(), &idx, 1).unwrap(),
            Selector::TableCell {
                rows: vec![0, 2],
                cols: vec![1]
            }
        );
    }

    #[test]
    fn test_table_bounds() {
        let bad_row = IndexArray::table_selection(vec![3], vec![0]);
        assert!(matches!(
            Selector::decode(&table(), &bad_row, 1),
            Err(AplError::IndexOutOfRange { index: 3, size: 3 })
        ));
        // Columns are checked against every key, not the selection.
        let second_col = IndexArray::table_selection(vec![0], vec![1]);
        assert!(Selector::decode(&table(), &second_col, 1).is_ok());
        let bad_col = IndexArray::table_selection(vec![0], vec![2]);
        assert!(Selector::decode(&table(), &bad_col, 1).is_err());
    }

    // ── object ────────────────────────────────────────────────────────────────

    #[test]
    fn test_object_keys_use_origin() {
        let idx = IndexArray::vector(vec![2, 1]);
        assert_eq!(
            Selector::decode(&object(), &idx, 1).unwrap(),
            Selector::ObjectDepth(DepthPath::Keys(vec![1, 0]))
        );
        let idx = IndexArray::vector(vec![0]);
        assert_eq!(
            Selector::decode(&object(), &idx, 0).unwrap(),
            Selector::ObjectDepth(DepthPath::Keys(vec![0]))
        );
        assert!(Selector::decode(&object(), &IndexArray::vector(vec![0]), 1).is_err());
    }

    #[test]
    fn test_object_single_negative_selects_position() {
        let idx = IndexArray::vector(vec![-2]);
        assert_eq!(
            Selector::decode(&object(), &idx, 1).unwrap(),
            Selector::ObjectDepth(DepthPath::Keys(vec![1]))
        );
    }

    #[test]
    fn test_object_depth_descends() {
        let idx = IndexArray::vector(vec![-1, 1]);
        assert_eq!(
            Selector::decode(&object(), &idx, 1).unwrap(),
            Selector::ObjectDepth(DepthPath::Descend {
                position: 0,
                rest: Box::new(Selector::ObjectDepth(DepthPath::Keys(vec![0]))),
            })
        );
    }

    #[test]
    fn test_object_depth_into_scalar_is_unsupported() {
        let idx = IndexArray::vector(vec![-2, 1]);
        assert!(matches!(
            Selector::decode(&object(), &idx, 1),
            Err(AplError::UnsupportedDepth(_))
        ));
        let idx = IndexArray::vector(vec![-3, 1]);
        assert!(matches!(
            Selector::decode(&object(), &idx, 1),
            Err(AplError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_object_depth_into_table_is_unsupported() {
        let obj = Value::Object(DictValue::with_entries(vec![(DictKey::from("t"), table())]));
        let idx = IndexArray::vector(vec![-1, 0]);
        assert!(matches!(
            Selector::decode(&obj, &idx, 1),
            Err(AplError::UnsupportedDepth(_))
        ));
    }

    // ── list / array / scalar ─────────────────────────────────────────────────

    #[test]
    fn test_list_path_is_zero_based() {
        let list = Value::List(ListValue::new(vec![Value::Int(1)]));
        assert_eq!(
            Selector::decode(&list, &IndexArray::vector(vec![0, 3]), 1).unwrap(),
            Selector::ObjectDepth(DepthPath::List(vec![0, 3]))
        );
        assert!(Selector::decode(&list, &IndexArray::vector(vec![-1]), 1).is_err());
    }

    #[test]
    fn test_array_and_scalar_targets() {
        let arr = Value::Array(ArrayValue::int_vector(vec![1, 2]));
        let idx = IndexArray::vector(vec![1, -1]);
        assert_eq!(
            Selector::decode(&arr, &idx, 1).unwrap(),
            Selector::Flat(idx.clone())
        );
        assert!(matches!(
            Selector::decode(&Value::Int(3), &idx, 1),
            Err(AplError::NotSettable(_))
        ));
    }
}
