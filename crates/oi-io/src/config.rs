//! TOML configuration loading.
//!
//! ```toml
//! data_dir = "/srv/oi"
//! dsp_sec = 60
//! only_cp = true
//!
//! [sessions.wide]
//! start = "09:30:00"
//! end = "15:00:00"
//!
//! [sessions.narrow]
//! start = "09:35:00"
//! end = "14:55:00"
//!
//! [symbols.159915]
//! ts_sigmas = [60, 300, 900]
//! strike_sigmas_wide = [0.05, 0.1]
//! strike_sigmas_narrow = [0.02, 0.05]
//! ```

use std::path::Path;

use oi_core::{errors::Result, Error, PipelineConfig};

use crate::io_error;

/// Parse and validate a configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] for malformed TOML or invalid settings.
pub fn parse_config(text: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig =
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Read, parse, and validate the configuration file at `path`.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, otherwise as
/// [`parse_config`].
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_config(&text)
}
