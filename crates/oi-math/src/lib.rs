//! # oi-math
//!
//! Numerical leaves of the surface pipeline: 1D interpolation along the
//! strike axis, Gaussian kernels in time and strike, weighted statistics,
//! and strike-window sizing with edge-padded sliding windows.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// 1D interpolation schemes and gap filling.
pub mod interpolations;

/// Gaussian kernels (continuous weights and discrete windows).
pub mod kernels;

/// Statistics accumulators.
pub mod statistics;

/// Strike-window sizing and edge-padded sliding windows.
pub mod window;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use interpolations::{fill_gaps, Interpolation1D, LinearInterpolation};
pub use kernels::{gaussian_weight, GaussianKernel};
pub use statistics::{median, Statistics};
pub use window::{sliding_windows, WindowSpec};
