//! Input parsing for the interactive `play` loop.

use rochambeau_engine::moves::Move;

/// What the player typed at the move prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// A move to play this round
    Move(Move),
    /// Start over at 0 - 0 (r or reset)
    Reset,
    /// End the session (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse one line of player input (case-insensitive).
///
/// ```rust
/// # use rochambeau_cli::validation::{parse_player_input, ParseResult};
/// use rochambeau_engine::moves::Move;
///
/// assert_eq!(parse_player_input("Rock"), ParseResult::Move(Move::Rock));
/// assert_eq!(parse_player_input("R"), ParseResult::Reset);
/// assert_eq!(parse_player_input("quit"), ParseResult::Quit);
///
/// match parse_player_input("lizard") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_input(input: &str) -> ParseResult {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match trimmed.to_lowercase().as_str() {
        "q" | "quit" => ParseResult::Quit,
        "r" | "reset" => ParseResult::Reset,
        token => match token.parse::<Move>() {
            Ok(m) => ParseResult::Move(m),
            Err(_) => ParseResult::Invalid(format!(
                "Unrecognized move '{}'. Valid input: rock, paper, scissors, r, q",
                trimmed
            )),
        },
    }
}
