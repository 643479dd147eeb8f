//! # Play Command
//!
//! Interactive rock-paper-scissors against the computer.
//!
//! The terminal is the presentation layer here: after the starting screen
//! and after every round or reset it redraws the result message and the
//! score line. Typing `r` resets the score, `q` (or EOF) ends the session.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_score;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_input};
use rochambeau_engine::report::Screen;
use rochambeau_engine::round::RoundController;
use std::io::{BufRead, Write};

/// Handle the play command: interactive rounds read from `stdin`.
///
/// # Arguments
///
/// * `rounds` - Stop after this many rounds (default: until quit or EOF)
/// * `seed` - Seed for the computer's moves (default: config, then random)
/// * `out` - Output stream for the game display
/// * `err` - Error stream for warnings and rejected input
/// * `stdin` - Input stream for player moves
///
/// # Errors
///
/// `CliError::InvalidInput` when `rounds` is zero, `CliError::Config` when the
/// configuration cannot be loaded, `CliError::Io` on write failures.
pub fn handle_play_command(
    rounds: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if rounds == Some(0) {
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    execute_play_command(rounds, seed, cfg.emoji, stdin, out, err)
}

fn execute_play_command(
    rounds: Option<u32>,
    seed: u64,
    emoji: bool,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match rounds {
        Some(n) => writeln!(out, "play: seed={} rounds={}", seed, n)?,
        None => writeln!(out, "play: seed={} rounds=unlimited", seed)?,
    }

    let mut game = RoundController::with_seed(seed);
    let ready = game.reset_round();
    render(out, &ready, emoji)?;

    let mut played = 0u32;
    while rounds.is_none_or(|limit| played < limit) {
        ui::prompt(out)?;
        let Some(line) = read_stdin_line(stdin)? else {
            writeln!(out)?;
            if let Some(limit) = rounds {
                ui::display_warning(
                    err,
                    &format!("input ended after {} of {} rounds", played, limit),
                )?;
            }
            break;
        };

        match parse_player_input(&line) {
            ParseResult::Move(m) => {
                let report = game.play_move(m);
                played += 1;
                render(out, &game.screen_for(report), emoji)?;
            }
            ParseResult::Reset => {
                let screen = game.reset_round();
                writeln!(out, "Game reset!")?;
                render(out, &screen, emoji)?;
            }
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
            }
        }
    }

    writeln!(out, "Rounds played: {}", played)?;
    writeln!(out, "Final {}", format_score(game.score()))?;
    Ok(())
}

fn render(out: &mut dyn Write, screen: &Screen, emoji: bool) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", screen.message_with(emoji))?;
    writeln!(out, "{}", format_score(screen.score()))?;
    writeln!(out)
}
