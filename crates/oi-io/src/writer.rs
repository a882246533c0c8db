//! CSV writers: the merged surface and the intermediate dumps.
//!
//! Missing cells are written as empty fields, timestamps via
//! [`format_timestamp`].

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use oi_core::utilities::format_timestamp;
use oi_core::{errors::Result, Cell};
use oi_surface::{IntermediateSink, IntersectedRow, MergedSurface, TimeStrikeGrid};
use tracing::{debug, info};

use crate::io_error;

fn cell_field(cell: &Cell) -> String {
    cell.map(|v| v.to_string()).unwrap_or_default()
}

fn create_writer(path: &Path) -> Result<Writer<File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    Writer::from_path(path).map_err(|e| io_error(path, e))
}

fn write_all<I, R>(path: &Path, header: Vec<String>, rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = create_writer(path)?;
    writer.write_record(&header).map_err(|e| io_error(path, e))?;
    for row in rows {
        writer
            .write_record(row.into_iter().collect::<Vec<_>>())
            .map_err(|e| io_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, e))
}

/// Write `surface` to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns [`oi_core::Error::Io`] if the file cannot be created or written.
pub fn write_surface(path: &Path, surface: &MergedSurface) -> Result<()> {
    let rows = surface.rows().map(|(dt, price, cells)| {
        [format_timestamp(&dt), price.to_string()]
            .into_iter()
            .chain(cells.iter().map(cell_field))
            .collect::<Vec<_>>()
    });
    write_all(path, surface.header(), rows)?;
    info!(
        path = %path.display(),
        rows = surface.len(),
        features = surface.feature_names().len(),
        "wrote merged surface"
    );
    Ok(())
}

/// Writes every intermediate grid and intersected table as CSV under a
/// directory.
///
/// Grids land in `grid_1d_{label}.csv` (one row per grid time, one column per
/// strike), intersections in `intersect_{label}.csv`.
#[derive(Debug, Clone)]
pub struct CsvDumpSink {
    dir: PathBuf,
}

impl CsvDumpSink {
    /// A sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the grid dump for `label`.
    pub fn grid_path(&self, label: &str) -> PathBuf {
        self.dir.join(format!("grid_1d_{label}.csv"))
    }

    /// Path of the intersection dump for `label`.
    pub fn intersect_path(&self, label: &str) -> PathBuf {
        self.dir.join(format!("intersect_{label}.csv"))
    }
}

fn window_field(window: &Option<Vec<Cell>>) -> String {
    match window {
        Some(cells) => {
            let parts: Vec<String> = cells
                .iter()
                .map(|c| c.map_or_else(|| "nan".to_string(), |v| v.to_string()))
                .collect();
            format!("[{}]", parts.join(" "))
        }
        None => String::new(),
    }
}

impl IntermediateSink for CsvDumpSink {
    fn grid(&mut self, label: &str, grid: &TimeStrikeGrid) -> Result<()> {
        let path = self.grid_path(label);
        let header = std::iter::once("dt".to_string())
            .chain(grid.strikes().iter().map(|k| k.to_string()))
            .collect();
        let rows = grid.rows().map(|(dt, cells)| {
            std::iter::once(format_timestamp(dt))
                .chain(cells.iter().map(cell_field))
                .collect::<Vec<_>>()
        });
        write_all(&path, header, rows)?;
        debug!(path = %path.display(), "dumped grid");
        Ok(())
    }

    fn intersect(&mut self, label: &str, rows: &[IntersectedRow]) -> Result<()> {
        let path = self.intersect_path(label);
        let header = ["dt", "price", "strike", "window"]
            .into_iter()
            .map(String::from)
            .collect();
        let records = rows.iter().map(|r| {
            vec![
                format_timestamp(&r.dt),
                r.price.to_string(),
                cell_field(&r.strike),
                window_field(&r.window),
            ]
        });
        write_all(&path, header, records)?;
        debug!(path = %path.display(), "dumped intersection");
        Ok(())
    }
}
