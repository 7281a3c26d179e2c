//! Shape and index arithmetic.
//!
//! Conversions between a multi-dimensional shape, flat row-major offsets and
//! multi-index vectors. The last axis varies fastest.

// The i64→usize cast in `normalize_axis` is guarded by the `resolved < 0`
// check.
#![allow(clippy::cast_sign_loss)]

use super::error::{AplError, AplResult};

/// Number of elements addressed by `shape`. The empty shape is a scalar.
pub fn flatten(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Row-major converter from a multi-index to a flat offset.
#[derive(Debug, Clone)]
pub struct IndexConverter {
    shape: Vec<usize>,
    weights: Vec<usize>,
}

impl IndexConverter {
    /// Create a converter for `shape` together with a zeroed scratch index
    /// vector of matching length.
    pub fn new(shape: &[usize]) -> (Self, Vec<usize>) {
        let mut weights = vec![1; shape.len()];
        for i in (0..shape.len().saturating_sub(1)).rev() {
            weights[i] = weights[i + 1] * shape[i + 1];
        }
        let converter = Self {
            shape: shape.to_vec(),
            weights,
        };
        (converter, vec![0; shape.len()])
    }

    /// Flat offset of the multi-index `idx`.
    pub fn index(&self, idx: &[usize]) -> usize {
        idx.iter().zip(&self.weights).map(|(i, w)| i * w).sum()
    }

    /// Multi-index of the flat offset `flat`.
    pub fn coords(&self, mut flat: usize) -> Vec<usize> {
        let mut idx = vec![0; self.shape.len()];
        for (i, &w) in self.weights.iter().enumerate() {
            if w > 0 {
                idx[i] = flat / w;
                flat %= w;
            }
        }
        idx
    }
}

/// Advance `idx` to the next multi-index of `shape` in row-major order.
///
/// After the last valid index it wraps around to all zeros.
pub fn inc_array_index(idx: &mut [usize], shape: &[usize]) {
    for i in (0..idx.len()).rev() {
        idx[i] += 1;
        if idx[i] < shape[i] {
            return;
        }
        idx[i] = 0;
    }
}

/// Resolve a possibly negative axis against `rank`.
pub fn normalize_axis(axis: i64, rank: usize) -> AplResult<usize> {
    let resolved = if axis < 0 { rank as i64 + axis } else { axis };
    if resolved < 0 || resolved >= rank as i64 {
        return Err(AplError::axis_out_of_range(axis, rank));
    }
    Ok(resolved as usize)
}

/// Drop every size-1 axis. Two shapes conform if their collapsed forms match.
pub fn collapse(shape: &[usize]) -> Vec<usize> {
    shape.iter().copied().filter(|&n| n != 1).collect()
}
