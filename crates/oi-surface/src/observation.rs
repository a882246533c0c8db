//! Observation records and signal selection.

use oi_core::{Real, Strike, Timestamp};

/// One tick of open-interest change at a strike.
///
/// Produced by ingestion after deduplication and the session cut; never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Observation time.
    pub dt: Timestamp,
    /// Strike price.
    pub strike: Strike,
    /// Change in call open interest.
    pub oi_diff_c: Real,
    /// Change in put open interest.
    pub oi_diff_p: Real,
}

impl Observation {
    /// Create an observation.
    pub fn new(dt: Timestamp, strike: Strike, oi_diff_c: Real, oi_diff_p: Real) -> Self {
        Self {
            dt,
            strike,
            oi_diff_c,
            oi_diff_p,
        }
    }
}

/// Which open-interest signal a grid or feature column carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Call open-interest change.
    Call,
    /// Put open-interest change.
    Put,
    /// Call minus put.
    CallPut,
}

impl Signal {
    /// The signal's value in one observation.
    pub fn value(self, obs: &Observation) -> Real {
        match self {
            Signal::Call => obs.oi_diff_c,
            Signal::Put => obs.oi_diff_p,
            Signal::CallPut => obs.oi_diff_c - obs.oi_diff_p,
        }
    }

    /// Short tag used in output column names (`c`, `p`, `cp`).
    pub fn tag(self) -> &'static str {
        match self {
            Signal::Call => "c",
            Signal::Put => "p",
            Signal::CallPut => "cp",
        }
    }

    /// Name of the source column (`oi_diff_c`, ...), used for dumps.
    pub fn source_column(self) -> &'static str {
        match self {
            Signal::Call => "oi_diff_c",
            Signal::Put => "oi_diff_p",
            Signal::CallPut => "oi_diff_cp",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source_column())
    }
}
