//! # rochambeau-engine: Rock-Paper-Scissors Game Core
//!
//! Decision and score-keeping logic for a player-versus-computer game of
//! rock-paper-scissors. Rendering is left to the caller: every operation
//! returns plain values ([`report::RoundReport`], [`report::Screen`]) that a
//! terminal or browser front end can draw.
//!
//! ## Core Modules
//!
//! - [`moves`] - `Move` and `Outcome` plus case-insensitive parsing
//! - [`rules`] - Winner determination
//! - [`chooser`] - Seeded uniform computer move generation
//! - [`score`] - Running score with reset
//! - [`round`] - Round orchestration
//! - [`report`] - Round reports and result messages
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use rochambeau_engine::round::RoundController;
//!
//! let mut game = RoundController::with_seed(42);
//! let ready = game.reset_round();
//! println!("{}", ready.message());
//!
//! let report = game.play_round("rock").expect("rock is a move");
//! let screen = game.screen_for(report);
//! println!("{}", screen.message());
//! println!("Score: {:?}", screen.score());
//! ```
//!
//! ## Deterministic Play
//!
//! The computer's moves come from a seeded ChaCha20 stream:
//!
//! ```rust
//! use rochambeau_engine::round::RoundController;
//!
//! let mut a = RoundController::with_seed(7);
//! let mut b = RoundController::with_seed(7);
//! assert_eq!(a.play_round("paper"), b.play_round("paper"));
//! ```

pub mod chooser;
pub mod errors;
pub mod moves;
pub mod report;
pub mod round;
pub mod rules;
pub mod score;
