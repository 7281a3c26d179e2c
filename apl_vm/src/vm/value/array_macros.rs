//! Macros for dispatching operations across ArrayData variants.
//!
//! This module provides macros to reduce code duplication when implementing
//! methods on ArrayData that need to handle every storage variant.

/// Dispatch a simple method call to all ArrayData variants.
///
/// This macro handles the common pattern of calling a method on the underlying
/// Vec for each ArrayData variant.
///
/// # Example
/// ```
/// use apl_vm::vm::value::ArrayData;
/// use apl_vm::array_data_dispatch;
///
/// let data = ArrayData::Float(vec![1.0, 2.0, 3.0]);
/// let len = array_data_dispatch!(&data, len);
/// assert_eq!(len, 3);
///
/// let is_empty = array_data_dispatch!(&data, is_empty);
/// assert!(!is_empty);
/// ```
#[macro_export]
macro_rules! array_data_dispatch {
    ($data:expr, $method:ident) => {
        match $data {
            $crate::vm::value::ArrayData::Bool(v) => v.$method(),
            $crate::vm::value::ArrayData::Int(v) => v.$method(),
            $crate::vm::value::ArrayData::Float(v) => v.$method(),
            $crate::vm::value::ArrayData::Complex(v) => v.$method(),
            $crate::vm::value::ArrayData::Str(v) => v.$method(),
            $crate::vm::value::ArrayData::Mixed(v) => v.$method(),
        }
    };
    // With arguments
    ($data:expr, $method:ident, $($arg:expr),+) => {
        match $data {
            $crate::vm::value::ArrayData::Bool(v) => v.$method($($arg),+),
            $crate::vm::value::ArrayData::Int(v) => v.$method($($arg),+),
            $crate::vm::value::ArrayData::Float(v) => v.$method($($arg),+),
            $crate::vm::value::ArrayData::Complex(v) => v.$method($($arg),+),
            $crate::vm::value::ArrayData::Str(v) => v.$method($($arg),+),
            $crate::vm::value::ArrayData::Mixed(v) => v.$method($($arg),+),
        }
    };
}

/// Build an ArrayData of the same variant as `$data` holding the elements at
/// the source positions yielded by the iterator `$order`.
///
/// Used by primitives that permute elements without changing the storage
/// representation.
///
/// # Example
/// ```
/// use apl_vm::vm::value::ArrayData;
/// use apl_vm::array_data_permute;
///
/// let data = ArrayData::Int(vec![10, 20, 30]);
/// let reversed = array_data_permute!(&data, [2usize, 1, 0].into_iter());
/// assert!(matches!(reversed, ArrayData::Int(v) if v == vec![30, 20, 10]));
/// ```
#[macro_export]
macro_rules! array_data_permute {
    ($data:expr, $order:expr) => {
        match $data {
            $crate::vm::value::ArrayData::Bool(v) => {
                $crate::vm::value::ArrayData::Bool($order.map(|i| v[i]).collect())
            }
            $crate::vm::value::ArrayData::Int(v) => {
                $crate::vm::value::ArrayData::Int($order.map(|i| v[i]).collect())
            }
            $crate::vm::value::ArrayData::Float(v) => {
                $crate::vm::value::ArrayData::Float($order.map(|i| v[i]).collect())
            }
            $crate::vm::value::ArrayData::Complex(v) => {
                $crate::vm::value::ArrayData::Complex($order.map(|i| v[i]).collect())
            }
            $crate::vm::value::ArrayData::Str(v) => {
                $crate::vm::value::ArrayData::Str($order.map(|i| v[i].clone()).collect())
            }
            $crate::vm::value::ArrayData::Mixed(v) => {
                $crate::vm::value::ArrayData::Mixed($order.map(|i| v[i].clone()).collect())
            }
        }
    };
}
