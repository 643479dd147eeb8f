use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GameError;

/// One of the three hand shapes a participant can throw in a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    /// Rock (✊), crushes scissors
    Rock,
    /// Paper (✋), covers rock
    Paper,
    /// Scissors (✌), cut paper
    Scissors,
}

impl Move {
    /// Returns `true` when `self` defeats `other`.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }

    /// Lower-case token accepted at the input boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    pub fn from_index(i: usize) -> Move {
        match i % 3 {
            0 => Move::Rock,
            1 => Move::Paper,
            _ => Move::Scissors,
        }
    }
}

pub fn all_moves() -> [Move; 3] {
    [Move::Rock, Move::Paper, Move::Scissors]
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Parses a move token case-insensitively, ignoring surrounding whitespace.
///
/// ```
/// use rochambeau_engine::moves::Move;
///
/// assert_eq!("ROCK".parse::<Move>(), Ok(Move::Rock));
/// assert_eq!(" scissors\n".parse::<Move>(), Ok(Move::Scissors));
/// assert!("lizard".parse::<Move>().is_err());
/// ```
impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(GameError::InvalidMoveToken(s.trim().to_string())),
        }
    }
}

/// Result of comparing the player's move against the computer's.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Tie,
}

impl Outcome {
    /// Headline shown under the two moves in a round report.
    pub fn headline(self) -> &'static str {
        match self {
            Outcome::PlayerWins => "YOU WIN this round!",
            Outcome::ComputerWins => "COMPUTER WINS this round!",
            Outcome::Tie => "It's a TIE!",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Outcome::PlayerWins => "🎉",
            Outcome::ComputerWins => "🤖",
            Outcome::Tie => "🤝",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::PlayerWins => "player",
            Outcome::ComputerWins => "computer",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        for token in ["rock", "Rock", "ROCK", "rOcK"] {
            assert_eq!(token.parse::<Move>().unwrap(), Move::Rock);
        }
        assert_eq!("PaPeR".parse::<Move>().unwrap(), Move::Paper);
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        let err = "spock".parse::<Move>().unwrap_err();
        assert_eq!(err, GameError::InvalidMoveToken("spock".to_string()));
        assert!("".parse::<Move>().is_err());
        assert!("rocks".parse::<Move>().is_err());
    }

    #[test]
    fn display_is_upper_case() {
        assert_eq!(Move::Scissors.to_string(), "SCISSORS");
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Move::from_index(0), Move::Rock);
        assert_eq!(Move::from_index(4), Move::Paper);
        assert_eq!(Move::from_index(2), Move::Scissors);
    }

    #[test]
    fn each_move_beats_exactly_one_other() {
        for m in all_moves() {
            let wins = all_moves().iter().filter(|&&o| m.beats(o)).count();
            assert_eq!(wins, 1, "{m} should beat exactly one move");
            assert!(!m.beats(m));
        }
    }
}
