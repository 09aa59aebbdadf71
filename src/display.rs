use crate::core::error::SalesCallError;
use console::style;
use std::io::{self, Write};

/// Write a completion to the result stream exactly as received, plus a newline.
pub fn print_response<W: Write + ?Sized>(out: &mut W, response: &str) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn error_label(err: &SalesCallError) -> &'static str {
    match err {
        SalesCallError::Usage(_) => "usage",
        SalesCallError::Config(_) => "config",
        SalesCallError::MissingArgument(_) => "missing argument",
        SalesCallError::Io { .. } => "io",
        SalesCallError::Gateway(_) => "gateway",
        SalesCallError::UnexpectedFinishReason(_) | SalesCallError::EmptyContent => {
            "invalid response"
        }
    }
}

/// Report a fatal error on stderr
pub fn display_error(err: &SalesCallError) {
    eprintln!(
        "{} {}",
        style(format!("❌ {} error:", error_label(err))).bold().red(),
        err
    );
}
