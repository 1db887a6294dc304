//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Print a value as JSON, or through `pretty` in pretty mode.
pub fn print<T: serde::Serialize>(value: &T, format: OutputFormat, pretty: impl Fn(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(value)),
        OutputFormat::Pretty => println!("{}", pretty(value)),
    }
}
