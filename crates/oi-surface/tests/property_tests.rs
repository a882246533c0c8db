//! Property-based tests of the spot intersection and time smoothing.

use chrono::{Duration, NaiveDate};
use oi_core::Timestamp;
use oi_surface::{
    spot_intersect, LongTable, Observation, Signal, SpotPoint, SpotTrajectory, TimeAxisSmoother,
    TimeStrikeGrid,
};
use proptest::prelude::*;

fn open() -> Timestamp {
    NaiveDate::from_ymd_opt(2025, 1, 8)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap()
}

// --- Nearest strike ---

proptest! {
    /// The selected strike is never farther from the spot price than any
    /// other strike of the grid row, and every spot point yields one row.
    #[test]
    fn intersection_picks_a_nearest_strike(
        ticks in prop::collection::btree_set(0_i32..400, 1..30),
        prices in prop::collection::vec(1.0_f64..22.0, 1..20),
    ) {
        let strikes: Vec<f64> = ticks.iter().map(|&t| 1.0 + 0.05 * t as f64).collect();
        let cells = vec![strikes.iter().map(|&k| Some(k * 10.0)).collect()];
        let grid = TimeStrikeGrid::new(vec![open()], strikes.clone(), cells).unwrap();
        let long = LongTable::unpivot(&grid, 1).unwrap();

        let spot = SpotTrajectory::from_points(prices.iter().enumerate().map(|(i, &price)| {
            SpotPoint { dt: open() + Duration::seconds(i as i64), price }
        }));
        let rows = spot_intersect(&spot, &long, 60);
        prop_assert_eq!(rows.len(), spot.len());

        for row in rows {
            let chosen = row.strike.unwrap();
            let best = strikes
                .iter()
                .map(|k| (k - row.price).abs())
                .fold(f64::INFINITY, f64::min);
            prop_assert!((chosen - row.price).abs() <= best + 1e-12);
            prop_assert_eq!(row.window, Some(vec![Some(chosen * 10.0)]));
        }
    }
}

// --- Time smoothing ---

proptest! {
    /// A signal constant in time is reproduced on every filled cell,
    /// whatever the tick pattern and bandwidth.
    #[test]
    fn smoothing_preserves_constant_signal(
        offsets in prop::collection::btree_set(0_i64..3600, 1..50),
        level in -500.0_f64..500.0,
        ts_sigma in 1_i64..1800,
    ) {
        let observations: Vec<Observation> = offsets
            .iter()
            .map(|&s| Observation::new(open() + Duration::seconds(s), 2.5, level, 0.0))
            .collect();
        let smoother = TimeAxisSmoother::new(60, ts_sigma, 3.5).unwrap();
        let grid = smoother.smooth(&observations, Signal::CallPut).unwrap();
        prop_assert_eq!(grid.n_strikes(), 1);
        for (_, row) in grid.rows() {
            if let Some(v) = row[0] {
                prop_assert!((v - level).abs() <= 1e-9 * level.abs().max(1.0));
            }
        }
    }
}
