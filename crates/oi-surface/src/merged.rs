//! Final merged table: the spot trajectory plus one column per feature.

use oi_core::{errors::Result, Cell, Price, Real, Seconds, TimeSeries, Timestamp};
use oi_core::utilities::format_bandwidth;

use crate::observation::Signal;
use crate::spot::SpotTrajectory;
use crate::table::concat_columns;

/// Column name for one `(signal, ts_sigma, strike_sigma)` triple:
/// `oi_{signal}_{ts_sigma}_{strike_sigma}`.
pub fn feature_name(signal: Signal, ts_sigma: Seconds, strike_sigma: Real) -> String {
    format!(
        "oi_{}_{}_{}",
        signal.tag(),
        ts_sigma,
        format_bandwidth(strike_sigma)
    )
}

/// One scalar feature keyed by spot timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    /// Unique output column name.
    pub name: String,
    /// Values by timestamp.
    pub values: TimeSeries<Timestamp, Cell>,
}

impl FeatureColumn {
    /// Element-wise `self - other`, missing where either side is missing.
    pub fn difference(&self, other: &FeatureColumn, name: String) -> FeatureColumn {
        let values = self
            .values
            .iter()
            .map(|(dt, a)| {
                let b = other.values.get(dt).copied().flatten();
                (*dt, a.zip(b).map(|(a, b)| a - b))
            })
            .collect();
        FeatureColumn { name, values }
    }
}

/// Spot columns concatenated with every feature column, one row per spot
/// timestamp in ascending order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedSurface {
    index: Vec<Timestamp>,
    spot: Vec<Price>,
    columns: Vec<(String, Vec<Cell>)>,
}

impl MergedSurface {
    /// Align `features` on the timestamps of `spot`.
    ///
    /// # Errors
    /// Returns an error if two features share a name.
    pub fn new(spot: &SpotTrajectory, features: &[FeatureColumn]) -> Result<Self> {
        let index = spot.timestamps();
        let named: Vec<(String, TimeSeries<Timestamp, Cell>)> = features
            .iter()
            .map(|f| (f.name.clone(), f.values.clone()))
            .collect();
        let columns = concat_columns(&index, &named)?;
        Ok(Self {
            index,
            spot: spot.prices(),
            columns,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row timestamps.
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.index
    }

    /// Spot prices, row-aligned.
    pub fn spot_prices(&self) -> &[Price] {
        &self.spot
    }

    /// Feature column names in output order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Full header: `dt`, `spot_price`, then the feature names.
    pub fn header(&self) -> Vec<String> {
        ["dt", "spot_price"]
            .into_iter()
            .map(String::from)
            .chain(self.columns.iter().map(|(n, _)| n.clone()))
            .collect()
    }

    /// Values of one feature column.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterate rows as `(timestamp, spot price, feature values)`.
    pub fn rows(&self) -> impl Iterator<Item = (Timestamp, Price, Vec<Cell>)> + '_ {
        (0..self.index.len()).map(move |i| {
            (
                self.index[i],
                self.spot[i],
                self.columns.iter().map(|(_, v)| v[i]).collect(),
            )
        })
    }
}
