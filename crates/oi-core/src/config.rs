//! Pipeline configuration.
//!
//! [`PipelineConfig`] is constructed once at process start (usually from a
//! TOML file, see `oi-io`) and passed by reference into every stage. It
//! carries the data root, the sampling period, the kernel cutoff, session
//! cuts, and the per-symbol bandwidth lists.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::{ensure, Real, Seconds, Timestamp};

/// Default sampling period of the uniform time grid, in seconds.
pub const DEFAULT_DSP_SEC: Seconds = 60;

/// Default kernel cutoff, in standard deviations.
pub const DEFAULT_CUTOFF: Real = 3.5;

/// Which session convention a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// The wide cut: longer trading window, wide strike bandwidths.
    Wide,
    /// The narrow cut: trimmed trading window, narrow strike bandwidths.
    Narrow,
}

impl SessionKind {
    /// Build from the `wide` flag used on the command line.
    pub fn from_wide(wide: bool) -> Self {
        if wide {
            SessionKind::Wide
        } else {
            SessionKind::Narrow
        }
    }

    /// Suffix appended to output file names.
    pub fn file_suffix(self) -> &'static str {
        match self {
            SessionKind::Wide => "_wide",
            SessionKind::Narrow => "_narrow",
        }
    }
}

/// Inclusive time-of-day bounds applied to observations before smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCut {
    /// First time of day kept.
    pub start: NaiveTime,
    /// Last time of day kept.
    pub end: NaiveTime,
}

impl SessionCut {
    /// Create a cut from `(hour, minute)` pairs.
    ///
    /// # Errors
    /// Returns an error for an out-of-range time or when `start >= end`.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Result<Self> {
        let to_time = |(h, m): (u32, u32)| {
            NaiveTime::from_hms_opt(h, m, 0)
                .ok_or_else(|| Error::InvalidArgument(format!("invalid time of day {h:02}:{m:02}")))
        };
        let cut = Self {
            start: to_time(start)?,
            end: to_time(end)?,
        };
        cut.validate()?;
        Ok(cut)
    }

    /// Whether `ts` falls inside the cut (both bounds inclusive).
    pub fn contains(&self, ts: &Timestamp) -> bool {
        let t = ts.time();
        t >= self.start && t <= self.end
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.start < self.end,
            "session start {} must precede end {}",
            self.start,
            self.end
        );
        Ok(())
    }
}

/// The wide and narrow session cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sessions {
    /// Cut used for [`SessionKind::Wide`].
    pub wide: SessionCut,
    /// Cut used for [`SessionKind::Narrow`].
    pub narrow: SessionCut,
}

impl Default for Sessions {
    fn default() -> Self {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
        Self {
            wide: SessionCut {
                start: hm(9, 30),
                end: hm(15, 0),
            },
            narrow: SessionCut {
                start: hm(9, 35),
                end: hm(14, 55),
            },
        }
    }
}

impl Sessions {
    /// The cut for `kind`.
    pub fn get(&self, kind: SessionKind) -> &SessionCut {
        match kind {
            SessionKind::Wide => &self.wide,
            SessionKind::Narrow => &self.narrow,
        }
    }
}

/// Per-symbol bandwidth lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// Time bandwidths, in seconds.
    pub ts_sigmas: Vec<Seconds>,
    /// Strike bandwidths (price units) for the wide session.
    pub strike_sigmas_wide: Vec<Real>,
    /// Strike bandwidths (price units) for the narrow session.
    pub strike_sigmas_narrow: Vec<Real>,
}

impl SymbolConfig {
    /// Strike bandwidths for the given session kind.
    pub fn strike_sigmas(&self, kind: SessionKind) -> &[Real] {
        match kind {
            SessionKind::Wide => &self.strike_sigmas_wide,
            SessionKind::Narrow => &self.strike_sigmas_narrow,
        }
    }

    fn validate(&self, symbol: &str) -> Result<()> {
        ensure!(!self.ts_sigmas.is_empty(), "{symbol}: ts_sigmas is empty");
        ensure!(
            self.ts_sigmas.iter().all(|&s| s > 0),
            "{symbol}: every ts_sigma must be positive, got {:?}",
            self.ts_sigmas
        );
        for (name, list) in [
            ("strike_sigmas_wide", &self.strike_sigmas_wide),
            ("strike_sigmas_narrow", &self.strike_sigmas_narrow),
        ] {
            ensure!(!list.is_empty(), "{symbol}: {name} is empty");
            ensure!(
                list.iter().all(|&s| s.is_finite() && s > 0.0),
                "{symbol}: every entry of {name} must be positive, got {list:?}"
            );
        }
        Ok(())
    }
}

fn default_dsp_sec() -> Seconds {
    DEFAULT_DSP_SEC
}

fn default_cutoff() -> Real {
    DEFAULT_CUTOFF
}

fn default_only_cp() -> bool {
    true
}

/// Top-level configuration threaded through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root directory holding `dsp_input/`, `dsp_conv/`, and `tmp/`.
    pub data_dir: PathBuf,
    /// Sampling period of the uniform time grid, in seconds.
    #[serde(default = "default_dsp_sec")]
    pub dsp_sec: Seconds,
    /// Kernel cutoff in standard deviations, shared by time and strike axes.
    #[serde(default = "default_cutoff")]
    pub cutoff: Real,
    /// Compute only the call-minus-put differential.
    #[serde(default = "default_only_cp")]
    pub only_cp: bool,
    /// Write interpolated grids and intersected tables under `tmp/`.
    #[serde(default)]
    pub dump_intermediate: bool,
    /// Wide and narrow session cuts.
    #[serde(default)]
    pub sessions: Sessions,
    /// Bandwidth lists keyed by symbol.
    #[serde(default)]
    pub symbols: BTreeMap<String, SymbolConfig>,
}

impl PipelineConfig {
    /// A configuration rooted at `data_dir` with every default applied and no
    /// symbols registered.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            dsp_sec: DEFAULT_DSP_SEC,
            cutoff: DEFAULT_CUTOFF,
            only_cp: true,
            dump_intermediate: false,
            sessions: Sessions::default(),
            symbols: BTreeMap::new(),
        }
    }

    /// Register (or replace) the bandwidth lists of `symbol`.
    pub fn with_symbol(mut self, symbol: impl Into<String>, cfg: SymbolConfig) -> Self {
        self.symbols.insert(symbol.into(), cfg);
        self
    }

    /// Check every numeric setting once, before any stage runs.
    ///
    /// # Errors
    /// Returns a [`Error::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.validate_inner()
            .map_err(|e| Error::Config(e.to_string()))
    }

    fn validate_inner(&self) -> Result<()> {
        ensure!(self.dsp_sec > 0, "dsp_sec must be positive, got {}", self.dsp_sec);
        ensure!(
            self.cutoff.is_finite() && self.cutoff > 0.0,
            "cutoff must be positive, got {}",
            self.cutoff
        );
        self.sessions.wide.validate()?;
        self.sessions.narrow.validate()?;
        for (symbol, cfg) in &self.symbols {
            cfg.validate(symbol)?;
        }
        Ok(())
    }

    /// Bandwidth lists for `symbol`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the symbol is not configured.
    pub fn symbol(&self, symbol: &str) -> Result<&SymbolConfig> {
        self.symbols
            .get(symbol)
            .ok_or_else(|| Error::Config(format!("no configuration for symbol `{symbol}`")))
    }

    /// Path of the observation file for a symbol/session suffix.
    pub fn input_path(&self, symbol: &str, suffix: &str) -> PathBuf {
        self.data_dir
            .join("dsp_input")
            .join(format!("strike_oi_diff_{symbol}_{suffix}.csv"))
    }

    /// Path of the spot-trajectory file for a symbol/session suffix.
    pub fn spot_path(&self, symbol: &str, suffix: &str) -> PathBuf {
        self.data_dir
            .join("dsp_input")
            .join(format!("spot_{symbol}_{suffix}.csv"))
    }

    /// Path of the merged-surface output file.
    pub fn output_path(&self, symbol: &str, suffix: &str, kind: SessionKind) -> PathBuf {
        self.data_dir.join("dsp_conv").join(format!(
            "merged_{symbol}_{suffix}_s5{}.csv",
            kind.file_suffix()
        ))
    }

    /// Directory receiving intermediate dumps.
    pub fn tmp_dir(&self) -> PathBuf {
        self.data_dir.join("tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::parse_timestamp;

    fn symbol_cfg() -> SymbolConfig {
        SymbolConfig {
            ts_sigmas: vec![60, 300],
            strike_sigmas_wide: vec![0.05, 0.1],
            strike_sigmas_narrow: vec![0.02],
        }
    }

    #[test]
    fn defaults() {
        let cfg = PipelineConfig::new("/data");
        assert_eq!(cfg.dsp_sec, 60);
        assert_eq!(cfg.cutoff, 3.5);
        assert!(cfg.only_cp);
        assert!(!cfg.dump_intermediate);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn paths_are_derived_from_data_dir() {
        let cfg = PipelineConfig::new("/data");
        assert_eq!(
            cfg.input_path("159915", "exp20250122_date20250108"),
            PathBuf::from("/data/dsp_input/strike_oi_diff_159915_exp20250122_date20250108.csv")
        );
        assert_eq!(
            cfg.output_path("159915", "x", SessionKind::Wide),
            PathBuf::from("/data/dsp_conv/merged_159915_x_s5_wide.csv")
        );
        assert_eq!(cfg.tmp_dir(), PathBuf::from("/data/tmp"));
    }

    #[test]
    fn strike_sigmas_follow_session_kind() {
        let cfg = PipelineConfig::new("/data").with_symbol("159915", symbol_cfg());
        let sym = cfg.symbol("159915").unwrap();
        assert_eq!(sym.strike_sigmas(SessionKind::Wide), &[0.05, 0.1]);
        assert_eq!(sym.strike_sigmas(SessionKind::Narrow), &[0.02]);
        assert!(matches!(cfg.symbol("510050"), Err(Error::Config(_))));
    }

    #[test]
    fn validation_rejects_bad_settings() {
        let mut cfg = PipelineConfig::new("/data");
        cfg.dsp_sec = 0;
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));

        let mut bad = symbol_cfg();
        bad.strike_sigmas_narrow = vec![0.0];
        let cfg = PipelineConfig::new("/data").with_symbol("x", bad);
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));

        let mut bad = symbol_cfg();
        bad.ts_sigmas.clear();
        let cfg = PipelineConfig::new("/data").with_symbol("x", bad);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn session_cut_bounds_are_inclusive() {
        let cut = SessionCut::from_hm((9, 30), (15, 0)).unwrap();
        assert!(cut.contains(&parse_timestamp("2025-01-08 09:30:00").unwrap()));
        assert!(cut.contains(&parse_timestamp("2025-01-08 15:00:00").unwrap()));
        assert!(!cut.contains(&parse_timestamp("2025-01-08 09:29:59").unwrap()));
        assert!(!cut.contains(&parse_timestamp("2025-01-08 15:00:01").unwrap()));
        assert!(SessionCut::from_hm((15, 0), (9, 30)).is_err());
        assert!(SessionCut::from_hm((25, 0), (26, 0)).is_err());
    }

    #[test]
    fn default_sessions() {
        let sessions = Sessions::default();
        assert_eq!(sessions.get(SessionKind::Wide).start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(sessions.get(SessionKind::Narrow).end, NaiveTime::from_hms_opt(14, 55, 0).unwrap());
        assert_eq!(SessionKind::from_wide(false), SessionKind::Narrow);
    }
}
