//! Cross-product driver and call/put differential.
//!
//! For every `(ts_sigma, strike_sigma)` pair the full pipeline (smooth,
//! interpolate, size window, unpivot, intersect, aggregate) is run per signal,
//! and the resulting columns are concatenated against the spot trajectory.
//! Pairs are independent; they only read the shared observations and spot
//! trajectory.

use oi_core::{errors::Result, PipelineConfig, Real, Seconds};
use oi_core::utilities::format_bandwidth;
use oi_math::WindowSpec;
use tracing::{debug, info};

use crate::aggregate::gaussian_dot;
use crate::intersect::spot_intersect;
use crate::long_form::LongTable;
use crate::merged::{feature_name, FeatureColumn, MergedSurface};
use crate::observation::{Observation, Signal};
use crate::sink::{IntermediateSink, NoopSink};
use crate::smoother::TimeAxisSmoother;
use crate::spot::SpotTrajectory;

/// One time-bandwidth / strike-bandwidth combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthPair {
    /// Time bandwidth in seconds.
    pub ts_sigma: Seconds,
    /// Strike bandwidth in price units.
    pub strike_sigma: Real,
}

impl BandwidthPair {
    /// Create a pair.
    pub fn new(ts_sigma: Seconds, strike_sigma: Real) -> Self {
        Self {
            ts_sigma,
            strike_sigma,
        }
    }

    /// All pairs of the cross-product, time bandwidth outermost.
    pub fn cross(ts_sigmas: &[Seconds], strike_sigmas: &[Real]) -> Vec<Self> {
        ts_sigmas
            .iter()
            .flat_map(|&ts| strike_sigmas.iter().map(move |&k| Self::new(ts, k)))
            .collect()
    }

    /// Label used for intermediate dumps: `{column}_{ts_sigma}_{strike_sigma}`.
    pub fn label(&self, signal: Signal) -> String {
        format!(
            "{}_{}_{}",
            signal.source_column(),
            self.ts_sigma,
            format_bandwidth(self.strike_sigma)
        )
    }
}

/// Runs the surface pipeline over a bandwidth cross-product.
pub struct BatchCombiner<'a> {
    dsp_sec: Seconds,
    cutoff: Real,
    only_cp: bool,
    sink: Box<dyn IntermediateSink + 'a>,
}

impl std::fmt::Debug for BatchCombiner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCombiner")
            .field("dsp_sec", &self.dsp_sec)
            .field("cutoff", &self.cutoff)
            .field("only_cp", &self.only_cp)
            .finish_non_exhaustive()
    }
}

impl<'a> BatchCombiner<'a> {
    /// A combiner sampling every `dsp_sec` seconds with kernel cutoff
    /// `cutoff`, computing call, put, and differential columns.
    pub fn new(dsp_sec: Seconds, cutoff: Real) -> Self {
        Self {
            dsp_sec,
            cutoff,
            only_cp: false,
            sink: Box::new(NoopSink),
        }
    }

    /// A combiner taking its sampling period, cutoff, and `only_cp` flag from
    /// `config`.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.dsp_sec, config.cutoff).only_cp(config.only_cp)
    }

    /// Compute only the call-minus-put differential.
    pub fn only_cp(mut self, only_cp: bool) -> Self {
        self.only_cp = only_cp;
        self
    }

    /// Send intermediate grids and intersections to `sink`.
    pub fn with_sink(mut self, sink: impl IntermediateSink + 'a) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Smooth, window, intersect, and aggregate one signal for one pair.
    ///
    /// The returned column is named for the signal and pair.
    ///
    /// # Errors
    /// Returns an error for invalid bandwidths or when the sink fails.
    pub fn feature(
        &mut self,
        spot: &SpotTrajectory,
        observations: &[Observation],
        signal: Signal,
        pair: BandwidthPair,
    ) -> Result<FeatureColumn> {
        let label = pair.label(signal);
        let smoother = TimeAxisSmoother::new(self.dsp_sec, pair.ts_sigma, self.cutoff)?;
        let grid = smoother.smooth(observations, signal)?.interpolate_strikes()?;
        self.sink.grid(&label, &grid)?;

        let spec = WindowSpec::for_strikes(grid.strikes(), pair.strike_sigma, self.cutoff)?;
        debug!(
            label = %label,
            size = spec.size,
            sigma = spec.sigma,
            median_spacing = ?spec.median_spacing,
            "sized strike window"
        );
        let long = LongTable::unpivot(&grid, spec.size)?;
        let intersected = spot_intersect(spot, &long, self.dsp_sec);
        self.sink.intersect(&label, &intersected)?;

        Ok(FeatureColumn {
            name: feature_name(signal, pair.ts_sigma, pair.strike_sigma),
            values: gaussian_dot(&intersected, &spec),
        })
    }

    /// The columns of one pair: `oi_cp_*` alone, or `oi_c_*`, `oi_p_*`, and
    /// their difference `oi_cp_*`.
    ///
    /// # Errors
    /// See [`BatchCombiner::feature`].
    pub fn pair_columns(
        &mut self,
        spot: &SpotTrajectory,
        observations: &[Observation],
        pair: BandwidthPair,
    ) -> Result<Vec<FeatureColumn>> {
        info!(
            "processing ts={}, strike={}",
            pair.ts_sigma,
            format_bandwidth(pair.strike_sigma)
        );
        if self.only_cp {
            return Ok(vec![self.feature(spot, observations, Signal::CallPut, pair)?]);
        }
        let call = self.feature(spot, observations, Signal::Call, pair)?;
        let put = self.feature(spot, observations, Signal::Put, pair)?;
        let cp = call.difference(
            &put,
            feature_name(Signal::CallPut, pair.ts_sigma, pair.strike_sigma),
        );
        Ok(vec![call, put, cp])
    }

    /// Run every pair of `ts_sigmas × strike_sigmas` and merge the columns
    /// with the spot trajectory.
    ///
    /// # Errors
    /// See [`BatchCombiner::feature`]; also fails if two pairs produce the
    /// same column name (duplicate bandwidths).
    pub fn run(
        &mut self,
        spot: &SpotTrajectory,
        observations: &[Observation],
        ts_sigmas: &[Seconds],
        strike_sigmas: &[Real],
    ) -> Result<MergedSurface> {
        let pairs = BandwidthPair::cross(ts_sigmas, strike_sigmas);
        info!(
            pairs = pairs.len(),
            observations = observations.len(),
            spot_rows = spot.len(),
            only_cp = self.only_cp,
            "building scroll surface"
        );
        let mut columns = Vec::new();
        for pair in pairs {
            columns.extend(self.pair_columns(spot, observations, pair)?);
        }
        MergedSurface::new(spot, &columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TimeStrikeGrid;
    use crate::intersect::IntersectedRow;
    use crate::spot::SpotPoint;
    use approx::assert_abs_diff_eq;
    use oi_core::utilities::parse_timestamp;
    use oi_core::Timestamp;

    fn ts(s: &str) -> Timestamp {
        parse_timestamp(s).unwrap()
    }

    fn fixture() -> (SpotTrajectory, Vec<Observation>) {
        let times = ["2025-01-08 09:31:00", "2025-01-08 09:32:00", "2025-01-08 09:33:00"];
        let mut obs = Vec::new();
        for t in times {
            for strike in [100.0, 110.0] {
                obs.push(Observation::new(ts(t), strike, 5.0, 2.0));
            }
        }
        let spot = SpotTrajectory::from_points(
            times.iter().map(|t| SpotPoint { dt: ts(t), price: 101.0 }),
        );
        (spot, obs)
    }

    #[test]
    fn cross_product_order() {
        let pairs = BandwidthPair::cross(&[60, 300], &[0.05, 0.1]);
        assert_eq!(
            pairs,
            vec![
                BandwidthPair::new(60, 0.05),
                BandwidthPair::new(60, 0.1),
                BandwidthPair::new(300, 0.05),
                BandwidthPair::new(300, 0.1),
            ]
        );
        assert_eq!(pairs[3].label(Signal::CallPut), "oi_diff_cp_300_0.1");
    }

    #[test]
    fn full_columns_include_difference() {
        let (spot, obs) = fixture();
        let merged = BatchCombiner::new(60, 3.5)
            .run(&spot, &obs, &[600], &[20.0])
            .unwrap();
        assert_eq!(
            merged.feature_names(),
            vec!["oi_c_600_20.0", "oi_p_600_20.0", "oi_cp_600_20.0"]
        );
        for v in merged.column("oi_cp_600_20.0").unwrap() {
            assert_abs_diff_eq!(v.unwrap(), 3.0, epsilon = 1e-9);
        }
        for v in merged.column("oi_p_600_20.0").unwrap() {
            assert_abs_diff_eq!(v.unwrap(), 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn duplicate_bandwidths_are_rejected() {
        let (spot, obs) = fixture();
        let result = BatchCombiner::new(60, 3.5)
            .only_cp(true)
            .run(&spot, &obs, &[600, 600], &[20.0]);
        assert!(result.is_err());
    }

    #[derive(Default)]
    struct Recorder {
        grids: Vec<String>,
        intersects: Vec<(String, usize)>,
    }

    impl IntermediateSink for Recorder {
        fn grid(&mut self, label: &str, _grid: &TimeStrikeGrid) -> Result<()> {
            self.grids.push(label.to_string());
            Ok(())
        }

        fn intersect(&mut self, label: &str, rows: &[IntersectedRow]) -> Result<()> {
            self.intersects.push((label.to_string(), rows.len()));
            Ok(())
        }
    }

    #[test]
    fn sink_receives_every_intermediate() {
        let (spot, obs) = fixture();
        let mut recorder = Recorder::default();
        BatchCombiner::new(60, 3.5)
            .only_cp(true)
            .with_sink(&mut recorder)
            .run(&spot, &obs, &[60, 120], &[5.0])
            .unwrap();
        assert_eq!(recorder.grids, vec!["oi_diff_cp_60_5.0", "oi_diff_cp_120_5.0"]);
        assert_eq!(recorder.intersects[1], ("oi_diff_cp_120_5.0".to_string(), 3));
    }
}
