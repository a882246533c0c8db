//! Sliding windows and wide-to-long unpivot.
//!
//! Every cell of a [`TimeStrikeGrid`] is replaced by the symmetric
//! neighborhood of its row (edge-padded at the strike boundaries), and the
//! wide grid is then melted into one row per `(timestamp, strike)`.

use oi_core::{errors::Result, Cell, Strike, Timestamp};
use oi_math::sliding_windows;

use crate::grid::TimeStrikeGrid;

/// One `(timestamp, strike)` cell carrying its strike neighborhood.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    /// Grid row timestamp.
    pub dt: Timestamp,
    /// Centre strike of the neighborhood.
    pub strike: Strike,
    /// Neighborhood values, lowest strike first.
    pub window: Vec<Cell>,
}

/// The long-form table produced by [`LongTable::unpivot`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LongTable {
    rows: Vec<LongRow>,
    window_size: usize,
}

impl LongTable {
    /// Window every grid row and melt the result.
    ///
    /// Rows come out strike-major: every timestamp of the lowest strike,
    /// then every timestamp of the next strike, and so on.
    ///
    /// # Errors
    /// Returns an error if `window_size` is even and non-zero.
    pub fn unpivot(grid: &TimeStrikeGrid, window_size: usize) -> Result<Self> {
        let windowed = grid
            .rows()
            .map(|(_, row)| sliding_windows(row, window_size))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(grid.n_times() * grid.n_strikes());
        for (col, &strike) in grid.strikes().iter().enumerate() {
            for (dt, neighborhoods) in grid.times().iter().zip(&windowed) {
                rows.push(LongRow {
                    dt: *dt,
                    strike,
                    window: neighborhoods[col].clone(),
                });
            }
        }
        Ok(Self { rows, window_size })
    }

    /// All rows in unpivot order.
    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    /// Length of every neighborhood.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oi_core::utilities::parse_timestamp;

    fn ts(s: &str) -> Timestamp {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn unpivot_is_strike_major_with_edge_padding() {
        let t0 = ts("2025-01-08 09:31:00");
        let t1 = ts("2025-01-08 09:32:00");
        let grid = TimeStrikeGrid::new(
            vec![t0, t1],
            vec![100.0, 105.0, 110.0],
            vec![
                vec![Some(10.0), Some(20.0), Some(30.0)],
                vec![Some(1.0), None, Some(3.0)],
            ],
        )
        .unwrap();
        let long = LongTable::unpivot(&grid, 3).unwrap();
        assert_eq!(long.len(), 6);
        assert_eq!(long.window_size(), 3);

        let keys: Vec<(Timestamp, Strike)> = long.rows().iter().map(|r| (r.dt, r.strike)).collect();
        assert_eq!(
            keys,
            vec![(t0, 100.0), (t1, 100.0), (t0, 105.0), (t1, 105.0), (t0, 110.0), (t1, 110.0)]
        );
        assert_eq!(long.rows()[0].window, vec![Some(10.0), Some(10.0), Some(20.0)]);
        assert_eq!(long.rows()[2].window, vec![Some(10.0), Some(20.0), Some(30.0)]);
        assert_eq!(long.rows()[4].window, vec![Some(20.0), Some(30.0), Some(30.0)]);
        assert_eq!(long.rows()[3].window, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn empty_grid_gives_empty_table() {
        let long = LongTable::unpivot(&TimeStrikeGrid::default(), 0).unwrap();
        assert!(long.is_empty());
    }
}
