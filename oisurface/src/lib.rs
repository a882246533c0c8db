//! # oisurface
//!
//! Smoothed open-interest "scroll surfaces": per-strike open-interest
//! changes are smoothed along time, interpolated across strikes, and sampled
//! at the strike nearest the spot price with a Gaussian strike kernel, for
//! every configured pair of time and strike bandwidths.
//!
//! This crate is a **façade** that re-exports the workspace crates and adds
//! [`run_symbol`], the one-shot driver behind the `oisurface` binary.
//!
//! ```rust
//! use oisurface::core::{PipelineConfig, SessionKind};
//!
//! let cfg = PipelineConfig::new("/srv/oi");
//! let out = cfg.output_path("159915", "exp20250122_date20250108", SessionKind::Wide);
//! assert!(out.ends_with("merged_159915_exp20250122_date20250108_s5_wide.csv"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, configuration, and error definitions.
pub use oi_core as core;

/// Numerical building blocks: interpolation, kernels, window sizing.
pub use oi_math as math;

/// The surface pipeline stages and the batch combiner.
pub use oi_surface as surface;

/// CSV ingestion and output, TOML configuration.
pub use oi_io as io;

mod driver;
mod logging;

pub use driver::{run_symbol, RunSummary};
pub use logging::{env_filter, init_logging};
