//! Error types for the open-interest surface workspace.
//!
//! A single `thiserror`-derived enum covers every fatal condition: malformed
//! or missing input files, invalid configuration, and violated
//! preconditions. Sparse or degenerate numeric input is *not* an error; it
//! surfaces as missing cells instead.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A file could not be opened, read, or written.
    #[error("i/o error on {path}: {message}")]
    Io {
        /// The file involved.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// A tabular input lacks a required column.
    #[error("{path}: missing required column `{column}`")]
    MissingColumn {
        /// The file involved.
        path: String,
        /// The name of the absent column.
        column: String,
    },

    /// A record could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// The file involved.
        path: String,
        /// 1-based line number of the offending record.
        line: u64,
        /// What went wrong.
        message: String,
    },

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use oi_core::{ensure, errors::Error};
/// fn positive(x: f64) -> oi_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
