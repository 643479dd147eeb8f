use serde::{Deserialize, Serialize};

use crate::moves::Outcome;

/// Round wins accumulated by each side since the last reset.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

/// Owns the running score of one game.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: Score,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits the winning side with one point; a tie changes nothing.
    pub fn record_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWins => self.score.player = self.score.player.saturating_add(1),
            Outcome::ComputerWins => self.score.computer = self.score.computer.saturating_add(1),
            Outcome::Tie => {}
        }
    }

    pub fn reset(&mut self) {
        self.score = Score::default();
    }

    pub fn current(&self) -> Score {
        self.score
    }
}
