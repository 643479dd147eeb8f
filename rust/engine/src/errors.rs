use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move '{0}' (expected rock, paper or scissors)")]
    InvalidMoveToken(String),
}
