//! Miscellaneous utilities.

pub mod data_formatters;
pub mod data_parsers;

pub use data_formatters::{format_bandwidth, format_timestamp};
pub use data_parsers::parse_timestamp;
