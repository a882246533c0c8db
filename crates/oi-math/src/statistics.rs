//! Weighted statistics accumulator and order statistics.

use oi_core::Real;
use statrs::statistics::{Data, Median};

/// Incremental weighted-mean accumulator.
///
/// Used by the time-axis smoother: each observation near a grid timestamp
/// is added with its kernel weight, and the cell value is the weighted mean.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    sum_w: Real,
    sum_wx: Real,
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a weighted sample.
    pub fn add_weighted(&mut self, x: Real, weight: Real) {
        self.sum_w += weight;
        self.sum_wx += weight * x;
    }

    /// Weighted mean. Returns `None` if the weights sum to zero (including
    /// when no samples have been added).
    pub fn mean(&self) -> Option<Real> {
        if self.sum_w == 0.0 {
            None
        } else {
            Some(self.sum_wx / self.sum_w)
        }
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Median of `values`, or `None` when empty.
pub fn median(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        return None;
    }
    Some(Data::new(values.to_vec()).median())
}
