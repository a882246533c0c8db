//! Time-axis smoother.
//!
//! Resamples irregular ticks onto a uniform time grid. Each strike is
//! smoothed independently: a grid cell is the Gaussian-weighted mean, in
//! time, of the observations *at that strike* within `cutoff · ts_sigma`
//! seconds. Strikes that did not trade near a grid time contribute nothing
//! there, so sparsity never drags a cell towards zero.

use chrono::{DateTime, Timelike};
use oi_core::{errors::Error, errors::Result, Cell, Real, Seconds, Strike, Timestamp};
use oi_math::{gaussian_weight, Statistics};
use tracing::debug;

use crate::grid::TimeStrikeGrid;
use crate::observation::{Observation, Signal};

/// Seconds since the Unix epoch, with sub-second precision.
pub(crate) fn epoch_seconds(ts: &Timestamp) -> Real {
    let whole = ts.and_utc().timestamp() as Real;
    whole + Real::from(ts.nanosecond()) * 1e-9
}

fn from_epoch_seconds(secs: Seconds) -> Result<Timestamp> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| Error::InvalidArgument(format!("timestamp out of range: {secs}s")))
}

/// Gaussian resampler from ticks to a uniform time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxisSmoother {
    dsp_sec: Seconds,
    ts_sigma: Seconds,
    cutoff: Real,
}

impl TimeAxisSmoother {
    /// A smoother producing rows every `dsp_sec` seconds with time bandwidth
    /// `ts_sigma` seconds, ignoring observations beyond `cutoff · ts_sigma`.
    ///
    /// # Errors
    /// Returns an error unless all three parameters are positive.
    pub fn new(dsp_sec: Seconds, ts_sigma: Seconds, cutoff: Real) -> Result<Self> {
        oi_core::ensure!(dsp_sec > 0, "dsp_sec must be positive, got {dsp_sec}");
        oi_core::ensure!(ts_sigma > 0, "ts_sigma must be positive, got {ts_sigma}");
        oi_core::ensure!(
            cutoff.is_finite() && cutoff > 0.0,
            "cutoff must be positive, got {cutoff}"
        );
        Ok(Self {
            dsp_sec,
            ts_sigma,
            cutoff,
        })
    }

    /// Uniform grid times covering `[first, last]`, both ends floored to a
    /// multiple of `dsp_sec` since the epoch.
    pub fn grid_times(&self, first: &Timestamp, last: &Timestamp) -> Result<Vec<Timestamp>> {
        let start = first.and_utc().timestamp().div_euclid(self.dsp_sec) * self.dsp_sec;
        let end = last.and_utc().timestamp().div_euclid(self.dsp_sec) * self.dsp_sec;
        let mut times = Vec::new();
        let mut t = start;
        while t <= end {
            times.push(from_epoch_seconds(t)?);
            t += self.dsp_sec;
        }
        Ok(times)
    }

    /// Smooth one signal of `observations` onto the grid.
    ///
    /// Columns are the distinct strikes observed; an empty input yields an
    /// empty grid.
    ///
    /// # Errors
    /// Returns an error if a strike is not finite.
    pub fn smooth(&self, observations: &[Observation], signal: Signal) -> Result<TimeStrikeGrid> {
        oi_core::ensure!(
            observations.iter().all(|o| o.strike.is_finite()),
            "observation strikes must be finite"
        );
        let Some(first) = observations.iter().map(|o| o.dt).min() else {
            return Ok(TimeStrikeGrid::default());
        };
        let last = observations.iter().map(|o| o.dt).max().unwrap_or(first);
        let times = self.grid_times(&first, &last)?;
        let grid_secs: Vec<Real> = times.iter().map(epoch_seconds).collect();

        // (strike, seconds, value), grouped by strike then ordered in time.
        let mut ticks: Vec<(Strike, Real, Real)> = observations
            .iter()
            .map(|o| (o.strike, epoch_seconds(&o.dt), signal.value(o)))
            .filter(|(_, _, v)| v.is_finite())
            .collect();
        ticks.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let mut strikes: Vec<Strike> = Vec::new();
        let mut columns: Vec<Vec<Cell>> = Vec::new();
        let mut start = 0;
        while start < ticks.len() {
            let strike = ticks[start].0;
            let end = start + ticks[start..].partition_point(|t| t.0 == strike);
            strikes.push(strike);
            columns.push(self.smooth_strike(&ticks[start..end], &grid_secs));
            start = end;
        }

        let cells = (0..times.len())
            .map(|row| columns.iter().map(|col| col[row]).collect())
            .collect();
        debug!(
            signal = %signal,
            ts_sigma = self.ts_sigma,
            rows = times.len(),
            strikes = strikes.len(),
            "smoothed time axis"
        );
        TimeStrikeGrid::new(times, strikes, cells)
    }

    /// Smooth the time-ordered ticks of a single strike.
    fn smooth_strike(&self, ticks: &[(Strike, Real, Real)], grid_secs: &[Real]) -> Vec<Cell> {
        let sigma = self.ts_sigma as Real;
        let radius = self.cutoff * sigma;
        let mut acc = Statistics::new();
        grid_secs
            .iter()
            .map(|&t| {
                let lo = ticks.partition_point(|tick| tick.1 < t - radius);
                let hi = ticks.partition_point(|tick| tick.1 <= t + radius);
                acc.reset();
                for &(_, ti, v) in &ticks[lo..hi] {
                    acc.add_weighted(v, gaussian_weight(ti - t, sigma));
                }
                acc.mean()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use oi_core::utilities::parse_timestamp;

    fn ts(s: &str) -> Timestamp {
        parse_timestamp(s).unwrap()
    }

    fn obs(t: &str, strike: Real, c: Real, p: Real) -> Observation {
        Observation::new(ts(t), strike, c, p)
    }

    #[test]
    fn grid_times_are_floored_and_inclusive() {
        let s = TimeAxisSmoother::new(60, 60, 3.5).unwrap();
        let times = s
            .grid_times(&ts("2025-01-08 09:30:20"), &ts("2025-01-08 09:32:59"))
            .unwrap();
        assert_eq!(
            times,
            vec![
                ts("2025-01-08 09:30:00"),
                ts("2025-01-08 09:31:00"),
                ts("2025-01-08 09:32:00"),
            ]
        );
    }

    #[test]
    fn constant_signal_stays_constant() {
        let data = vec![
            obs("2025-01-08 09:30:00", 100.0, 5.0, 0.0),
            obs("2025-01-08 09:31:00", 100.0, 5.0, 0.0),
            obs("2025-01-08 09:32:00", 100.0, 5.0, 0.0),
        ];
        let s = TimeAxisSmoother::new(60, 600, 3.5).unwrap();
        let grid = s.smooth(&data, Signal::Call).unwrap();
        assert_eq!(grid.n_times(), 3);
        assert_eq!(grid.strikes(), &[100.0]);
        for (_, row) in grid.rows() {
            assert_abs_diff_eq!(row[0].unwrap(), 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn weights_follow_time_distance() {
        let data = vec![
            obs("2025-01-08 09:30:00", 100.0, 0.0, 0.0),
            obs("2025-01-08 09:31:00", 100.0, 10.0, 0.0),
        ];
        let s = TimeAxisSmoother::new(60, 60, 3.5).unwrap();
        let grid = s.smooth(&data, Signal::Call).unwrap();
        let w = (-0.5_f64).exp();
        // At 09:30 the 09:31 tick is one sigma away.
        assert_abs_diff_eq!(grid.get(0, 0).unwrap(), 10.0 * w / (1.0 + w), epsilon = 1e-12);
        assert_abs_diff_eq!(grid.get(1, 0).unwrap(), 10.0 / (1.0 + w), epsilon = 1e-12);
    }

    #[test]
    fn absent_strikes_do_not_bias_and_far_ticks_are_cut() {
        let data = vec![
            obs("2025-01-08 09:30:00", 100.0, 4.0, 0.0),
            obs("2025-01-08 09:30:00", 105.0, 8.0, 0.0),
            obs("2025-01-08 09:40:00", 105.0, 8.0, 0.0),
        ];
        let s = TimeAxisSmoother::new(60, 60, 3.5).unwrap();
        let grid = s.smooth(&data, Signal::Call).unwrap();
        assert_eq!(grid.strikes(), &[100.0, 105.0]);
        assert_eq!(grid.n_times(), 11);
        assert_abs_diff_eq!(grid.get(0, 0).unwrap(), 4.0);
        // Strike 100 was never seen near 09:40: the cell is missing, not zero.
        assert_eq!(grid.get(10, 0), None);
        assert_abs_diff_eq!(grid.get(10, 1).unwrap(), 8.0);
        // 09:35 is five minutes (> 3.5 sigma) from every tick.
        assert_eq!(grid.get(5, 1), None);
    }

    #[test]
    fn call_put_differential_signal() {
        let data = vec![obs("2025-01-08 09:30:00", 100.0, 7.0, 2.0)];
        let s = TimeAxisSmoother::new(60, 60, 3.5).unwrap();
        let grid = s.smooth(&data, Signal::CallPut).unwrap();
        assert_eq!(grid.get(0, 0), Some(5.0));
    }

    #[test]
    fn empty_input_and_bad_parameters() {
        let s = TimeAxisSmoother::new(60, 60, 3.5).unwrap();
        assert_eq!(s.smooth(&[], Signal::Call).unwrap(), TimeStrikeGrid::default());
        assert!(TimeAxisSmoother::new(0, 60, 3.5).is_err());
        assert!(TimeAxisSmoother::new(60, 0, 3.5).is_err());
        assert!(TimeAxisSmoother::new(60, 60, 0.0).is_err());
    }
}
