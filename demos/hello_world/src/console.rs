//! Reporter writing parser output to the terminal.

use std::io::{self, Write};

use argfold::Reporter;

/// Sends requested output to stdout and diagnostics to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn display_out(&self, text: &str) {
        if let Err(err) = writeln!(io::stdout().lock(), "{text}") {
            tracing::warn!(%err, "could not write to stdout");
        }
    }

    fn display_err(&self, text: &str) {
        if let Err(err) = writeln!(io::stderr().lock(), "{text}") {
            tracing::warn!(%err, "could not write to stderr");
        }
    }
}
