//! Computer move distribution command.
//!
//! Draws a batch of computer moves from the same generator `play` uses and
//! prints how often each move came up.
//!
//! ## Purpose
//!
//! - Checking the generator is uniform over rock, paper and scissors
//! - Verifying determinism (same seed produces the same counts)

use crate::config;
use crate::error::CliError;
use crate::formatters::format_frequency;
use rochambeau_engine::chooser::{ChoiceGenerator, MoveSource};
use rochambeau_engine::moves::{Move, all_moves};
use std::io::Write;

/// Handle the rng command.
///
/// `seed` and `samples` fall back to the configuration (`ROCHAMBEAU_SEED`,
/// `ROCHAMBEAU_SAMPLES`), then to a random seed and 100 000 draws.
pub fn handle_rng_command(
    seed: Option<u64>,
    samples: Option<u32>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let samples = samples.unwrap_or(cfg.samples);
    if samples == 0 {
        return Err(CliError::InvalidInput("samples must be >= 1".to_string()));
    }

    let counts = sample_counts(seed, samples);
    writeln!(out, "RNG sample: seed={} draws={}", seed, samples)?;
    for m in all_moves() {
        writeln!(
            out,
            "{}",
            format_frequency(m, counts[m as usize], u64::from(samples))
        )?;
    }
    Ok(())
}

fn sample_counts(seed: u64, samples: u32) -> [u64; 3] {
    let mut generator = ChoiceGenerator::new_with_seed(seed);
    let mut counts = [0u64; 3];
    for _ in 0..samples {
        let m: Move = generator.next_move();
        counts[m as usize] += 1;
    }
    counts
}
