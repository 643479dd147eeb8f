use serde::{Deserialize, Serialize};

use crate::moves::{Move, Outcome};
use crate::score::Score;

/// Message shown before the first round and after every reset.
pub const READY_MESSAGE: &str = "Choose your move!";

/// Immutable summary of one completed round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number since the last reset
    pub round: u32,
    pub player_move: Move,
    pub computer_move: Move,
    pub outcome: Outcome,
}

impl RoundReport {
    /// Three-part result text: both moves, a blank line, then the headline.
    pub fn message(&self) -> String {
        self.message_with(true)
    }

    pub fn message_with(&self, emoji: bool) -> String {
        let headline = if emoji {
            format!("{} {}", self.outcome.emoji(), self.outcome.headline())
        } else {
            self.outcome.headline().to_string()
        };
        format!(
            "You chose: {}\nComputer chose: {}\n\n{}",
            self.player_move, self.computer_move, headline
        )
    }
}

/// Everything the presentation layer needs to draw the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Screen {
    /// Fresh game, waiting for the first move
    Ready { score: Score },
    /// Result of the most recent round
    Played { report: RoundReport, score: Score },
}

impl Screen {
    pub fn score(&self) -> Score {
        match self {
            Screen::Ready { score } | Screen::Played { score, .. } => *score,
        }
    }

    pub fn report(&self) -> Option<&RoundReport> {
        match self {
            Screen::Ready { .. } => None,
            Screen::Played { report, .. } => Some(report),
        }
    }

    pub fn message(&self) -> String {
        self.message_with(true)
    }

    pub fn message_with(&self, emoji: bool) -> String {
        match self {
            Screen::Ready { .. } => READY_MESSAGE.to_string(),
            Screen::Played { report, .. } => report.message_with(emoji),
        }
    }
}
