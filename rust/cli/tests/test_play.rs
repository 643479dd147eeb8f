use rochambeau_cli::run_with_input;
use std::io::Cursor;

fn play(args: &[&str], input: &str) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let code = run_with_input(args.iter().copied(), &mut out, &mut err, &mut stdin);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn final_score(stdout: &str) -> (u32, u32) {
    let line = stdout
        .lines()
        .find(|l| l.starts_with("Final Score:"))
        .expect("final score line");
    let nums: Vec<u32> = line
        .split_whitespace()
        .filter_map(|w| w.parse().ok())
        .collect();
    (nums[0], nums[1])
}

#[test]
fn session_tallies_match_round_headlines() {
    let input = "rock\npaper\nscissors\nrock\npaper\nscissors\nq\n";
    let (code, stdout, _) = play(&["rochambeau", "play", "--seed", "31337"], input);
    assert_eq!(code, 0);

    let wins = stdout.matches("YOU WIN this round!").count() as u32;
    let losses = stdout.matches("COMPUTER WINS this round!").count() as u32;
    let ties = stdout.matches("It's a TIE!").count() as u32;
    assert_eq!(wins + losses + ties, 6);
    assert_eq!(final_score(&stdout), (wins, losses));
}

#[test]
fn invalid_move_does_not_count_as_a_round() {
    let (code, stdout, stderr) = play(
        &["rochambeau", "play", "--seed", "1", "--rounds", "1"],
        "well\nROCK\n",
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("Error: Unrecognized move 'well'"));
    assert!(stdout.contains("Rounds played: 1"));
    assert_eq!(stdout.matches("You chose:").count(), 1);
}

#[test]
fn reset_mid_session_restarts_from_zero() {
    let (code, stdout, _) = play(
        &["rochambeau", "play", "--seed", "8"],
        "rock\nrock\nreset\npaper\n",
    );
    assert_eq!(code, 0);
    let after_reset = stdout.rsplit("Game reset!").next().unwrap();
    assert!(after_reset.contains("Score: You 0 - 0 Computer"));
    let (p, c) = final_score(&stdout);
    assert!(p + c <= 1, "only one round was played after the reset");
}

#[test]
fn seeded_sessions_are_reproducible() {
    let args = ["rochambeau", "play", "--seed", "2024", "--rounds", "5"];
    let input = "rock\nrock\npaper\nscissors\npaper\n";
    let (_, a, _) = play(&args, input);
    let (_, b, _) = play(&args, input);
    assert_eq!(a, b);
}

#[test]
fn immediate_eof_plays_nothing() {
    let (code, stdout, _) = play(&["rochambeau", "play", "--seed", "3"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Choose your move!"));
    assert!(stdout.contains("Rounds played: 0"));
    assert_eq!(final_score(&stdout), (0, 0));
}

#[test]
fn non_utf8_line_is_rejected_and_play_continues() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(b"rock\n\xff\xfe\npaper\nscissors\n".to_vec());
    let code = run_with_input(
        ["rochambeau", "play", "--seed", "4", "--rounds", "3"],
        &mut out,
        &mut err,
        &mut stdin,
    );
    let stdout = String::from_utf8_lossy(&out);
    let stderr = String::from_utf8_lossy(&err);

    assert_eq!(code, 0);
    assert_eq!(stderr.matches("Error: Unrecognized move").count(), 1);
    assert!(!stderr.contains("input ended"));
    assert!(stdout.contains("You chose: PAPER"));
    assert!(stdout.contains("You chose: SCISSORS"));
    assert!(stdout.contains("Rounds played: 3"));
}
