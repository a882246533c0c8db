//! Nearest-strike intersection with the spot trajectory.
//!
//! For each spot observation the grid row in force is the one whose sampling
//! period `[grid_dt, grid_dt + dsp_sec)` contains the spot timestamp; within
//! that row, the strike nearest to the spot price is selected and its
//! neighborhood carried over. Spot ticks outside every sampling period (before
//! the first row, after the last, or across a session gap) match nothing.

use chrono::Duration;
use oi_core::{Cell, Price, Seconds, Strike, TimeSeries, Timestamp};
use tracing::debug;

use crate::long_form::LongTable;
use crate::spot::SpotTrajectory;
use crate::table::nearest_join_by;

/// One spot observation joined with its nearest-strike neighborhood.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectedRow {
    /// Spot timestamp.
    pub dt: Timestamp,
    /// Spot price.
    pub price: Price,
    /// Grid row the match was taken from, if any.
    pub grid_dt: Option<Timestamp>,
    /// Selected strike, if any.
    pub strike: Option<Strike>,
    /// Neighborhood of the selected strike; `None` when nothing matched.
    pub window: Option<Vec<Cell>>,
}

/// Join `spot` against a long-form grid sampled every `dsp_sec` seconds,
/// by nearest strike.
///
/// Returns exactly one row per spot observation, in ascending time order.
/// Spot observations not covered by any grid row's sampling period, or
/// covered by a row with no strikes, carry no neighborhood.
pub fn spot_intersect(
    spot: &SpotTrajectory,
    long: &LongTable,
    dsp_sec: Seconds,
) -> Vec<IntersectedRow> {
    let grid_times: TimeSeries<Timestamp, ()> = long.rows().iter().map(|r| (r.dt, ())).collect();
    let period = Duration::seconds(dsp_sec);

    let points: Vec<_> = spot.iter().collect();
    let partitions: Vec<Option<Timestamp>> = points
        .iter()
        .map(|p| {
            grid_times
                .asof(&p.dt)
                .map(|(t, _)| *t)
                .filter(|t| p.dt < *t + period)
        })
        .collect();

    let keyed: Vec<(Option<Timestamp>, Price)> = partitions
        .iter()
        .zip(&points)
        .map(|(k, p)| (*k, p.price))
        .collect();
    let matches = nearest_join_by(
        &keyed,
        long.rows(),
        |(k, price)| k.map(|k| (k, *price)),
        |r| (r.dt, r.strike),
    );

    let rows: Vec<IntersectedRow> = points
        .iter()
        .zip(partitions)
        .zip(matches)
        .map(|((p, grid_dt), m)| {
            let hit = m.map(|i| &long.rows()[i]);
            IntersectedRow {
                dt: p.dt,
                price: p.price,
                grid_dt,
                strike: hit.map(|r| r.strike),
                window: hit.map(|r| r.window.clone()),
            }
        })
        .collect();
    debug!(
        spot_rows = rows.len(),
        matched = rows.iter().filter(|r| r.window.is_some()).count(),
        "intersected spot trajectory"
    );
    rows
}
