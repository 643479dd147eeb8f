//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rochambeau",
    version,
    about = "Rock-paper-scissors against the computer"
)]
pub struct RochambeauCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds interactively (type rock, paper or scissors)
    Play {
        /// Stop after this many rounds
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: Option<u32>,
        /// Seed for the computer's moves
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print every pairing and its outcome
    Table,
    /// Sample computer moves and report their frequencies
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        /// Number of draws
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        samples: Option<u32>,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
