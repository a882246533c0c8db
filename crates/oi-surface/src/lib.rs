//! # oi-surface
//!
//! The scroll-surface pipeline: open-interest changes observed at irregular
//! times and strikes are smoothed onto a uniform time × strike grid, gaps
//! along the strike axis are interpolated, every cell is widened into a
//! symmetric strike neighborhood, the neighborhood nearest to the prevailing
//! spot price is selected at each instant, and a Gaussian kernel reduces it to
//! a scalar feature. [`batch::BatchCombiner`] repeats this over the
//! cross-product of time and strike bandwidths.
//!
//! ```text
//! observations ─▶ smoother ─▶ grid (interpolated) ─▶ long form ─▶ intersect ─▶ aggregate
//!                                                                    ▲
//!                                                 spot trajectory ───┘
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Gaussian reduction of intersected neighborhoods.
pub mod aggregate;

/// Cross-product driver and call/put differential.
pub mod batch;

/// Time × strike grid and strike-axis interpolation.
pub mod grid;

/// Nearest-strike intersection with the spot trajectory.
pub mod intersect;

/// Sliding windows and wide-to-long unpivot.
pub mod long_form;

/// Final merged table.
pub mod merged;

/// Observation records and signal selection.
pub mod observation;

/// Hooks for inspecting intermediate tables.
pub mod sink;

/// Time-axis smoother.
pub mod smoother;

/// Spot trajectory.
pub mod spot;

/// Keyed table primitives: nearest join and column concatenation.
pub mod table;

pub use aggregate::gaussian_dot;
pub use batch::{BandwidthPair, BatchCombiner};
pub use grid::TimeStrikeGrid;
pub use intersect::{spot_intersect, IntersectedRow};
pub use long_form::{LongRow, LongTable};
pub use merged::{feature_name, FeatureColumn, MergedSurface};
pub use observation::{Observation, Signal};
pub use sink::{IntermediateSink, NoopSink};
pub use smoother::TimeAxisSmoother;
pub use spot::{SpotPoint, SpotTrajectory};
