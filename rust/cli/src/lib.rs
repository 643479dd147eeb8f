//! # Rochambeau CLI Library
//!
//! Command-line front end for the rock-paper-scissors engine.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments and executes the matching
//! subcommand; [`run_with_input`] does the same with an explicit input stream
//! for the interactive `play` command.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["rochambeau", "table"];
//! let code = rochambeau_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play rounds against the computer
//! - `table`: Print the full outcome table
//! - `rng`: Check the distribution of computer moves
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, RochambeauCli};
use commands::{
    handle_cfg_command, handle_play_command, handle_rng_command, handle_table_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "table", "rng", "cfg"];

/// Main entry point for the CLI application.
///
/// Interactive input for `play` is read from the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`], reading interactive input from `stdin`.
///
/// ```
/// use std::io::Cursor;
///
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let mut input = Cursor::new("rock\nq\n");
/// let code = rochambeau_cli::run_with_input(
///     ["rochambeau", "play", "--seed", "1"],
///     &mut out,
///     &mut err,
///     &mut input,
/// );
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("You chose: ROCK"));
/// ```
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match RochambeauCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play { rounds, seed } => handle_play_command(rounds, seed, out, err, stdin),
        Commands::Table => handle_table_command(out),
        Commands::Rng { seed, samples } => handle_rng_command(seed, samples, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err);
    let _ = writeln!(err, "Rochambeau CLI");
    let _ = writeln!(err, "Usage: rochambeau <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: rochambeau --help");
    exit_code::ERROR
}
