//! One symbol, one session: read, preprocess, combine, write.

use std::path::PathBuf;

use oi_core::{errors::Result, PipelineConfig, SessionKind};
use oi_io::{cut_spot, read_observations, read_spot, remove_dup_cut, write_surface, CsvDumpSink};
use oi_surface::BatchCombiner;
use tracing::info;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The merged surface file.
    pub output: PathBuf,
    /// Rows written (one per spot timestamp).
    pub rows: usize,
    /// Feature columns written.
    pub features: usize,
}

/// Build and write the merged surface of `symbol` for the date/expiry
/// `suffix` under the session convention `kind`.
///
/// # Errors
/// Fails if the symbol is not configured, an input cannot be read, a stage
/// rejects its arguments, or the output cannot be written.
pub fn run_symbol(
    config: &PipelineConfig,
    symbol: &str,
    suffix: &str,
    kind: SessionKind,
) -> Result<RunSummary> {
    let bandwidths = config.symbol(symbol)?;
    let cut = config.sessions.get(kind);

    let observations = remove_dup_cut(read_observations(&config.input_path(symbol, suffix))?, cut);
    let spot = cut_spot(&read_spot(&config.spot_path(symbol, suffix))?, cut);

    let mut combiner = BatchCombiner::from_config(config);
    if config.dump_intermediate {
        combiner = combiner.with_sink(CsvDumpSink::new(config.tmp_dir()));
    }
    let surface = combiner.run(
        &spot,
        &observations,
        &bandwidths.ts_sigmas,
        bandwidths.strike_sigmas(kind),
    )?;

    let output = config.output_path(symbol, suffix, kind);
    write_surface(&output, &surface)?;
    let summary = RunSummary {
        output,
        rows: surface.len(),
        features: surface.feature_names().len(),
    };
    info!(
        symbol,
        suffix,
        session = ?kind,
        rows = summary.rows,
        features = summary.features,
        output = %summary.output.display(),
        "surface complete"
    );
    Ok(summary)
}
