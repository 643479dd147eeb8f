use rochambeau_engine::errors::GameError;
use rochambeau_engine::moves::{all_moves, Move, Outcome};
use rochambeau_engine::rules::{decide, decide_tokens, outcome_table};

use Move::{Paper, Rock, Scissors};
use Outcome::{ComputerWins, PlayerWins, Tie};

#[test]
fn identical_moves_always_tie() {
    for m in all_moves() {
        assert_eq!(decide(m, m), Tie, "{m} vs {m} should tie");
    }
}

#[test]
fn decide_is_antisymmetric() {
    for a in all_moves() {
        for b in all_moves() {
            if a == b {
                continue;
            }
            let forward = decide(a, b);
            let backward = decide(b, a);
            assert_ne!(forward, Tie);
            assert_eq!(
                forward == PlayerWins,
                backward == ComputerWins,
                "{a} vs {b} = {forward:?}, reversed = {backward:?}"
            );
        }
    }
}

#[test]
fn full_outcome_table_matches_standard_rules() {
    let expected = [
        (Rock, Rock, Tie),
        (Rock, Paper, ComputerWins),
        (Rock, Scissors, PlayerWins),
        (Paper, Rock, PlayerWins),
        (Paper, Paper, Tie),
        (Paper, Scissors, ComputerWins),
        (Scissors, Rock, ComputerWins),
        (Scissors, Paper, PlayerWins),
        (Scissors, Scissors, Tie),
    ];
    for (p, c, o) in expected {
        assert_eq!(decide(p, c), o, "{p} vs {c}");
    }
    assert_eq!(outcome_table(), expected.to_vec());
}

#[test]
fn token_comparison_ignores_case() {
    assert_eq!(decide_tokens("ROCK", "scissors"), Ok(PlayerWins));
    assert_eq!(decide_tokens("rock", "SCISSORS"), Ok(PlayerWins));
    assert_eq!(decide_tokens("Paper", "pApEr"), Ok(Tie));
    assert_eq!(decide_tokens("scissors", "Rock"), Ok(ComputerWins));
}

#[test]
fn tokens_outside_the_move_set_are_rejected() {
    assert!(matches!(
        decide_tokens("dynamite", "rock"),
        Err(GameError::InvalidMoveToken(t)) if t == "dynamite"
    ));
    assert!(matches!(
        decide_tokens("rock", "r"),
        Err(GameError::InvalidMoveToken(t)) if t == "r"
    ));
}
