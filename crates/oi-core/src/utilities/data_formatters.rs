//! Data formatting helpers for output columns and timestamps.

use crate::Real;
use chrono::{NaiveDateTime, Timelike};

/// Format a bandwidth for use inside a column name.
///
/// Whole numbers keep one decimal digit (`1.0` → `"1.0"`) and fractional
/// values use the shortest round-trip representation (`0.05` → `"0.05"`), so
/// names stay stable across runs and distinct across the bandwidth grid.
pub fn format_bandwidth(value: Real) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`, appending fractional seconds
/// only when present.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}
