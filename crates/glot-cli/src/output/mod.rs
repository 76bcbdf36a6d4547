//! Terminal and JSON output.

pub mod diagnostic;
pub mod table;

use std::fmt::Display;

use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

pub use diagnostic::PatternDiagnostic;

/// Print `value` as pretty JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Print an error line on stderr.
pub fn print_error(message: impl Display) {
    eprintln!(
        "{} {}",
        "error:".if_supports_color(Stream::Stderr, |text| text.red()),
        message
    );
}

/// Print a warning line on stderr.
pub fn print_warning(message: impl Display) {
    eprintln!(
        "{} {}",
        "warning:".if_supports_color(Stream::Stderr, |text| text.yellow()),
        message
    );
}
