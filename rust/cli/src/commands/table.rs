//! Outcome table command.
//!
//! Prints every player/computer pairing with its decided outcome, which makes
//! the rule set easy to eyeball from a shell.

use crate::error::CliError;
use crate::formatters::format_outcome_row;
use rochambeau_engine::rules::outcome_table;
use std::io::Write;

pub fn handle_table_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "=== Outcome table (player vs computer) ===")?;
    for (player, computer, outcome) in outcome_table() {
        writeln!(out, "{}", format_outcome_row(player, computer, outcome))?;
    }
    Ok(())
}
