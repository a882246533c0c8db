//! Gaussian kernels.
//!
//! Two flavours are used by the pipeline: a continuous weight for smoothing
//! irregular timestamps, and a discrete, sum-normalized window for reducing a
//! strike neighborhood to a scalar.

use oi_core::{Cell, Real};

/// Unnormalized Gaussian weight `exp(-½ (offset / sigma)²)`.
///
/// The normalizing constant of the normal density cancels in any weighted
/// average, so it is omitted.
#[inline]
pub fn gaussian_weight(offset: Real, sigma: Real) -> Real {
    let z = offset / sigma;
    (-0.5 * z * z).exp()
}

/// A discrete Gaussian window of odd length, normalized to sum to one.
///
/// Sample `n` of an `M`-point window sits at `n - (M - 1) / 2` columns from
/// the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<Real>,
    sigma: Real,
}

impl GaussianKernel {
    /// Build an `size`-point window with spread `sigma` (in columns).
    ///
    /// A one-point window is `[1]` whatever the spread. Returns `None` for an
    /// empty window or when the weights do not sum to a finite positive
    /// number (e.g. a non-positive spread), which callers treat as missing.
    pub fn new(size: usize, sigma: Real) -> Option<Self> {
        if size == 0 {
            return None;
        }
        if size == 1 {
            return Some(Self {
                weights: vec![1.0],
                sigma,
            });
        }
        let centre = (size - 1) as Real / 2.0;
        let raw: Vec<Real> = (0..size)
            .map(|n| gaussian_weight(n as Real - centre, sigma))
            .collect();
        let total: Real = raw.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        Some(Self {
            weights: raw.into_iter().map(|w| w / total).collect(),
            sigma,
        })
    }

    /// Normalized weights, centre in the middle.
    pub fn weights(&self) -> &[Real] {
        &self.weights
    }

    /// Window length.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`: construction rejects empty windows.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Spread in columns.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// Dot product of the kernel with a neighborhood.
    ///
    /// Any missing element, or a neighborhood of the wrong length, yields a
    /// missing result.
    pub fn apply(&self, window: &[Cell]) -> Cell {
        if window.len() != self.weights.len() {
            return None;
        }
        self.weights
            .iter()
            .zip(window)
            .try_fold(0.0, |acc, (w, v)| v.map(|v| acc + w * v))
    }
}
