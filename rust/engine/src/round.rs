use crate::chooser::{ChoiceGenerator, MoveSource};
use crate::errors::GameError;
use crate::moves::Move;
use crate::report::{RoundReport, Screen};
use crate::rules::decide;
use crate::score::{Score, ScoreTracker};

/// Runs rounds of one game: draws the computer's move, decides the outcome,
/// keeps score.
///
/// # Examples
///
/// ```
/// use rochambeau_engine::round::RoundController;
/// use rochambeau_engine::report::Screen;
///
/// let mut game = RoundController::with_seed(42);
/// assert!(matches!(game.reset_round(), Screen::Ready { .. }));
///
/// let report = game.play_round("Paper").expect("valid move");
/// assert_eq!(report.round, 1);
///
/// // Invalid tokens leave the game untouched
/// let before = game.score();
/// assert!(game.play_round("lizard").is_err());
/// assert_eq!(game.score(), before);
/// assert_eq!(game.rounds_played(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RoundController<S = ChoiceGenerator> {
    source: S,
    score: ScoreTracker,
    rounds: u32,
}

impl RoundController<ChoiceGenerator> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChoiceGenerator::new_with_seed(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChoiceGenerator::from_entropy())
    }

    pub fn seed(&self) -> u64 {
        self.source.seed()
    }
}

impl<S: MoveSource> RoundController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            score: ScoreTracker::new(),
            rounds: 0,
        }
    }

    /// Plays one round from a textual move token.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidMoveToken`] if the token is not a move. Nothing is
    /// drawn and the score is not touched in that case.
    pub fn play_round(&mut self, token: &str) -> Result<RoundReport, GameError> {
        let player_move = token.parse::<Move>().inspect_err(|e| {
            tracing::debug!(error = %e, "rejected move token");
        })?;
        Ok(self.play_move(player_move))
    }

    pub fn play_move(&mut self, player_move: Move) -> RoundReport {
        let computer_move = self.source.next_move();
        let outcome = decide(player_move, computer_move);
        self.score.record_outcome(outcome);
        self.rounds = self.rounds.saturating_add(1);

        tracing::debug!(
            round = self.rounds,
            player = %player_move.as_str(),
            computer = %computer_move.as_str(),
            winner = %outcome,
            "round played"
        );

        RoundReport {
            round: self.rounds,
            player_move,
            computer_move,
            outcome,
        }
    }

    /// Zeroes the score and returns the starting screen.
    pub fn reset_round(&mut self) -> Screen {
        self.score.reset();
        self.rounds = 0;
        tracing::debug!("game reset");
        Screen::Ready {
            score: self.score.current(),
        }
    }

    /// Pairs a report with the current score for rendering.
    pub fn screen_for(&self, report: RoundReport) -> Screen {
        Screen::Played {
            report,
            score: self.score.current(),
        }
    }

    pub fn score(&self) -> Score {
        self.score.current()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
