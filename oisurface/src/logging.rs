//! Subscriber setup for the `oisurface` binary.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter built from `directives` in `RUST_LOG` syntax, falling back to
/// `INFO` when no directive is given. Unparsable directives are skipped.
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `INFO`.
pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&directives))
        .init();
}
