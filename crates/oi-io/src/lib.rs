//! # oi-io
//!
//! Flat-file collaborators of the surface pipeline: reading observation and
//! spot CSV files, deduplicating and session-cutting observations, loading
//! the TOML configuration, and writing the merged surface and intermediate
//! dumps back out as CSV.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// TOML configuration loading.
pub mod config;

/// Deduplication and session cut.
pub mod preprocess;

/// CSV readers.
pub mod reader;

/// CSV writers and the intermediate dump sink.
pub mod writer;

pub use config::{load_config, parse_config};
pub use preprocess::{cut_spot, remove_dup_cut};
pub use reader::{read_observations, read_spot};
pub use writer::{write_surface, CsvDumpSink};

use std::path::Path;

use oi_core::Error;

/// Wrap any displayable error as an [`Error::Io`] on `path`.
pub(crate) fn io_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
