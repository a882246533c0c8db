//! Data parsing helpers.
//!
//! Input files come from several upstream tools that disagree on the
//! timestamp layout, so parsing tries each accepted format in turn.

use chrono::NaiveDateTime;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp such as `"2025-01-08 09:31:00"`,
/// `"2025-01-08T09:31:00.250"`, or `"2025-01-08 09:31"`.
///
/// Returns `None` if no accepted format matches.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
