//! # oi-core
//!
//! Core types, configuration, and error definitions shared by the
//! open-interest surface workspace.
//!
//! This crate provides the foundational building blocks used by every other
//! crate: primitive type aliases, the error hierarchy, the `TimeSeries`
//! container used for feature columns, timestamp helpers, and the explicit
//! pipeline configuration that is threaded through each stage.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Pipeline configuration (sampling period, bandwidth lists, sessions).
pub mod config;

/// Error types and the `ensure!` macro.
pub mod errors;

/// Generic time-series container.
pub mod time_series;

/// Timestamp parsing and column-name formatting.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// A strike price.
pub type Strike = Real;

/// A spot or strike price level.
pub type Price = Real;

/// A duration or bandwidth expressed in seconds.
pub type Seconds = i64;

/// Timestamp type of observations and grid rows (exchange-local, naive).
pub type Timestamp = chrono::NaiveDateTime;

/// A possibly-missing value. `None` is the explicit "missing" sentinel and is
/// propagated by every interpolation, aggregation, and join.
pub type Cell = Option<Real>;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use config::{PipelineConfig, SessionCut, SessionKind, SymbolConfig};
pub use errors::{Error, Result};
pub use time_series::TimeSeries;
