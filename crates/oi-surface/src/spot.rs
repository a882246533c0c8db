//! Spot trajectory.

use oi_core::{Price, TimeSeries, Timestamp};
use tracing::warn;

/// One spot observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotPoint {
    /// Observation time.
    pub dt: Timestamp,
    /// Spot price.
    pub price: Price,
}

/// The underlying's price path, one price per distinct timestamp, in
/// ascending time order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpotTrajectory {
    series: TimeSeries<Timestamp, Price>,
}

impl SpotTrajectory {
    /// Build from points in any order. When a timestamp repeats, the last
    /// point in input order wins.
    pub fn from_points(points: impl IntoIterator<Item = SpotPoint>) -> Self {
        let mut series = TimeSeries::new();
        let mut duplicates = 0_usize;
        for p in points {
            if series.insert(p.dt, p.price).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            warn!(duplicates, "spot trajectory had repeated timestamps; kept the last price of each");
        }
        Self { series }
    }

    /// Number of distinct timestamps.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Timestamps in ascending order.
    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.series.keys()
    }

    /// Prices in timestamp order.
    pub fn prices(&self) -> Vec<Price> {
        self.series.values()
    }

    /// Iterate points in ascending time order.
    pub fn iter(&self) -> impl Iterator<Item = SpotPoint> + '_ {
        self.series.iter().map(|(dt, price)| SpotPoint {
            dt: *dt,
            price: *price,
        })
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
    fn sorts_and_dedupes() {
        let spot = SpotTrajectory::from_points(vec![
            SpotPoint { dt: ts("2025-01-08 09:32:00"), price: 2.51 },
            SpotPoint { dt: ts("2025-01-08 09:31:00"), price: 2.50 },
            SpotPoint { dt: ts("2025-01-08 09:32:00"), price: 2.52 },
        ]);
        assert_eq!(spot.len(), 2);
        assert_eq!(
            spot.timestamps(),
            vec![ts("2025-01-08 09:31:00"), ts("2025-01-08 09:32:00")]
        );
        assert_eq!(spot.prices(), vec![2.50, 2.52]);
        assert_eq!(spot.iter().count(), 2);
    }
}
