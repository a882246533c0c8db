//! Hooks for inspecting intermediate tables.
//!
//! The batch combiner hands every interpolated grid and intersected table to
//! an [`IntermediateSink`] before moving on. Flat-file dumps live in `oi-io`;
//! the default sink discards everything.

use oi_core::errors::Result;

use crate::grid::TimeStrikeGrid;
use crate::intersect::IntersectedRow;

/// Receiver of per-bandwidth intermediate results.
///
/// `label` identifies the signal and bandwidth pair, e.g. `oi_diff_cp_300_0.05`.
pub trait IntermediateSink {
    /// Called with the strike-interpolated grid.
    fn grid(&mut self, label: &str, grid: &TimeStrikeGrid) -> Result<()>;

    /// Called with the spot-intersected rows, before aggregation.
    fn intersect(&mut self, label: &str, rows: &[IntersectedRow]) -> Result<()>;
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl IntermediateSink for NoopSink {
    fn grid(&mut self, _label: &str, _grid: &TimeStrikeGrid) -> Result<()> {
        Ok(())
    }

    fn intersect(&mut self, _label: &str, _rows: &[IntersectedRow]) -> Result<()> {
        Ok(())
    }
}

impl<S: IntermediateSink + ?Sized> IntermediateSink for &mut S {
    fn grid(&mut self, label: &str, grid: &TimeStrikeGrid) -> Result<()> {
        (**self).grid(label, grid)
    }

    fn intersect(&mut self, label: &str, rows: &[IntersectedRow]) -> Result<()> {
        (**self).intersect(label, rows)
    }
}
