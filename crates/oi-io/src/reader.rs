//! CSV readers for observations and the spot trajectory.
//!
//! Both readers check the header for the required columns before touching any
//! record, so a missing column is reported by name rather than as a parse
//! failure on the first row. Extra columns are ignored.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use oi_core::utilities::parse_timestamp;
use oi_core::{errors::Result, Error, Real, Timestamp};
use oi_surface::{Observation, SpotPoint, SpotTrajectory};
use serde::Deserialize;
use tracing::info;

use crate::io_error;

/// Columns every observation file must carry.
pub const OBSERVATION_COLUMNS: [&str; 4] = ["dt", "strike", "oi_diff_c", "oi_diff_p"];

/// Columns every spot file must carry.
pub const SPOT_COLUMNS: [&str; 2] = ["dt", "spot_price"];

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    dt: String,
    strike: Real,
    oi_diff_c: Option<Real>,
    oi_diff_p: Option<Real>,
}

#[derive(Debug, Deserialize)]
struct SpotRecord {
    dt: String,
    spot_price: Real,
}

/// Read every row of the observation file at `path`, in file order.
///
/// An empty `oi_diff_c` or `oi_diff_p` field reads as NaN; the smoother
/// skips non-finite values, so such a row only contributes its other signal.
///
/// # Errors
/// [`Error::Io`] if the file cannot be opened, [`Error::MissingColumn`] if a
/// required column is absent, [`Error::Parse`] for an unreadable record.
pub fn read_observations(path: &Path) -> Result<Vec<Observation>> {
    let observations = read_records(path, &OBSERVATION_COLUMNS, |r: ObservationRecord, line| {
        Ok(Observation::new(
            timestamp(path, line, &r.dt)?,
            r.strike,
            r.oi_diff_c.unwrap_or(Real::NAN),
            r.oi_diff_p.unwrap_or(Real::NAN),
        ))
    })?;
    info!(path = %path.display(), rows = observations.len(), "read observations");
    Ok(observations)
}

/// Read the spot file at `path` into a trajectory sorted by time.
///
/// Repeated timestamps keep the last price in file order.
///
/// # Errors
/// As [`read_observations`].
pub fn read_spot(path: &Path) -> Result<SpotTrajectory> {
    let points = read_records(path, &SPOT_COLUMNS, |r: SpotRecord, line| {
        Ok(SpotPoint {
            dt: timestamp(path, line, &r.dt)?,
            price: r.spot_price,
        })
    })?;
    let spot = SpotTrajectory::from_points(points);
    info!(path = %path.display(), rows = spot.len(), "read spot trajectory");
    Ok(spot)
}

fn read_records<R, T>(
    path: &Path,
    required: &[&str],
    mut convert: impl FnMut(R, u64) -> Result<T>,
) -> Result<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let headers = reader.headers().map_err(|e| io_error(path, e))?.clone();
    check_columns(path, &headers, required)?;

    let mut out = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| parse_error(path, e.position().map_or(0, |p| p.line()), e))?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, |p| p.line());
        let row: R = record
            .deserialize(Some(&headers))
            .map_err(|e| parse_error(path, line, e))?;
        out.push(convert(row, line)?);
    }
    Ok(out)
}

fn check_columns(path: &Path, headers: &StringRecord, required: &[&str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MissingColumn {
                path: path.display().to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

fn timestamp(path: &Path, line: u64, text: &str) -> Result<Timestamp> {
    parse_timestamp(text).ok_or_else(|| parse_error(path, line, format!("unrecognised timestamp `{text}`")))
}

fn parse_error(path: &Path, line: u64, err: impl std::fmt::Display) -> Error {
    Error::Parse {
        path: path.display().to_string(),
        line,
        message: err.to_string(),
    }
}
