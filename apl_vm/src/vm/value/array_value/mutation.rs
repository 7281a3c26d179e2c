//! ArrayValue mutation methods: element writes and representation changes.

use super::super::super::error::AplResult;
use super::super::array_data::ArrayData;
use super::super::array_element::ElementType;
use super::super::Value;
use super::ArrayValue;

impl ArrayValue {
    /// Store `value` at a flat offset.
    ///
    /// Fails with `IndexOutOfRange` or, for uniform storage that cannot hold
    /// the value, with `TypeMismatch`.
    pub fn set(&mut self, index: usize, value: Value) -> AplResult<()> {
        self.data.set_value(index, value)
    }

    /// Mixed copy of this array holding boxed copies of every element.
    pub fn upgrade(&self) -> ArrayValue {
        tracing::debug!(
            from = %self.element_type(),
            size = self.size(),
            "upgrading uniform array to mixed storage"
        );
        ArrayValue::from_parts(ArrayData::Mixed(self.values()), self.shape.clone())
    }

    /// Collapse mixed storage into uniform storage.
    ///
    /// With `strict`, all elements must be scalars of one exact type.
    /// Otherwise numeric elements are promoted along bool < int < float <
    /// complex. Uniform arrays unify to themselves; empty mixed arrays and
    /// arrays holding containers do not unify.
    pub fn unify(&self, strict: bool) -> Option<ArrayValue> {
        let values = match &self.data {
            ArrayData::Mixed(values) => values,
            _ => return Some(self.clone()),
        };
        let mut types = values.iter().map(Value::element_type);
        let mut common = types.next()??;
        for ty in types {
            let ty = ty?;
            common = if strict {
                (ty == common).then_some(common)?
            } else {
                common.promote(ty)?
            };
        }
        debug_assert_ne!(common, ElementType::Mixed);
        let data = ArrayData::from_values(common, values).ok()?;
        Some(ArrayValue::from_parts(data, self.shape.clone()))
    }

    /// Non-strict unify, keeping `self` when it does not unify.
    pub fn unify_or_keep(self) -> ArrayValue {
        match self.unify(false) {
            Some(unified) => unified,
            None => self,
        }
    }
}
