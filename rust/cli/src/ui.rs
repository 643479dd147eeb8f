//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Draw the move prompt without a trailing newline.
pub fn prompt(out: &mut dyn Write) -> std::io::Result<()> {
    write!(out, "Your move (rock/paper/scissors, r=reset, q=quit): ")?;
    out.flush()
}
