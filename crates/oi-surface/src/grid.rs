//! Time × strike grid and strike-axis interpolation.

use oi_core::{errors::Result, Cell, Strike, Timestamp};
use oi_math::fill_gaps;

/// A uniform-time grid with one column per strike.
///
/// Rows are timestamps `dsp_sec` apart; columns are strictly increasing
/// strikes, not necessarily evenly spaced. `cells[row][col]` is the smoothed
/// value, or `None` where nothing was observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeStrikeGrid {
    times: Vec<Timestamp>,
    strikes: Vec<Strike>,
    cells: Vec<Vec<Cell>>,
}

impl TimeStrikeGrid {
    /// Assemble a grid from its axes and row-major cells.
    ///
    /// # Errors
    /// Returns an error if the shapes disagree, the strikes are not strictly
    /// increasing, or the times are not strictly increasing.
    pub fn new(times: Vec<Timestamp>, strikes: Vec<Strike>, cells: Vec<Vec<Cell>>) -> Result<Self> {
        oi_core::ensure!(
            cells.len() == times.len(),
            "grid has {} rows but {} timestamps",
            cells.len(),
            times.len()
        );
        oi_core::ensure!(
            cells.iter().all(|row| row.len() == strikes.len()),
            "every grid row must have {} strike columns",
            strikes.len()
        );
        oi_core::ensure!(
            strikes.windows(2).all(|w| w[0] < w[1]),
            "grid strikes must be strictly increasing"
        );
        oi_core::ensure!(
            times.windows(2).all(|w| w[0] < w[1]),
            "grid timestamps must be strictly increasing"
        );
        Ok(Self {
            times,
            strikes,
            cells,
        })
    }

    /// Row timestamps.
    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    /// Column strikes.
    pub fn strikes(&self) -> &[Strike] {
        &self.strikes
    }

    /// Cells of one row.
    pub fn row(&self, i: usize) -> &[Cell] {
        &self.cells[i]
    }

    /// Iterate `(timestamp, row)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&Timestamp, &[Cell])> {
        self.times.iter().zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of rows.
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Number of strike columns.
    pub fn n_strikes(&self) -> usize {
        self.strikes.len()
    }

    /// Number of cells holding a value.
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Fill missing cells row by row with linear interpolation in strike.
    ///
    /// Gaps between the lowest and highest observed strike of a row are
    /// filled; strikes outside that range stay missing.
    ///
    /// # Errors
    /// Propagates interpolation errors, which cannot occur for a grid built
    /// through [`TimeStrikeGrid::new`].
    pub fn interpolate_strikes(&self) -> Result<Self> {
        let cells = self
            .cells
            .iter()
            .map(|row| fill_gaps(&self.strikes, row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            times: self.times.clone(),
            strikes: self.strikes.clone(),
            cells,
        })
    }
}
