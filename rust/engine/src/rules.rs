use crate::errors::GameError;
use crate::moves::{all_moves, Move, Outcome};

/// Decides the outcome of a round from the player's point of view.
///
/// Identical moves tie. Otherwise the player wins when their move beats the
/// computer's (rock over scissors, paper over rock, scissors over paper) and
/// loses in every other pairing.
///
/// # Examples
///
/// ```
/// use rochambeau_engine::moves::{Move, Outcome};
/// use rochambeau_engine::rules::decide;
///
/// assert_eq!(decide(Move::Rock, Move::Scissors), Outcome::PlayerWins);
/// assert_eq!(decide(Move::Rock, Move::Paper), Outcome::ComputerWins);
/// assert_eq!(decide(Move::Paper, Move::Paper), Outcome::Tie);
/// ```
pub fn decide(player: Move, computer: Move) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::PlayerWins
    } else {
        Outcome::ComputerWins
    }
}

/// Parses two textual move tokens and decides the round.
///
/// Tokens are matched case-insensitively.
///
/// # Errors
///
/// Returns [`GameError::InvalidMoveToken`] naming the first token that is not
/// one of `rock`, `paper` or `scissors`.
///
/// ```
/// use rochambeau_engine::moves::Outcome;
/// use rochambeau_engine::rules::decide_tokens;
///
/// assert_eq!(decide_tokens("ROCK", "scissors"), Ok(Outcome::PlayerWins));
/// assert!(decide_tokens("rock", "well").is_err());
/// ```
pub fn decide_tokens(player: &str, computer: &str) -> Result<Outcome, GameError> {
    let player: Move = player.parse()?;
    let computer: Move = computer.parse()?;
    Ok(decide(player, computer))
}

/// Every (player, computer) pairing with its outcome, rows in
/// rock/paper/scissors order.
pub fn outcome_table() -> Vec<(Move, Move, Outcome)> {
    let mut v = Vec::with_capacity(9);
    for &p in &all_moves() {
        for &c in &all_moves() {
            v.push((p, c, decide(p, c)));
        }
    }
    v
}
