//! Plain-text formatters for scores, outcome tables and draw statistics.

use rochambeau_engine::moves::{Move, Outcome};
use rochambeau_engine::score::Score;

pub fn format_score(score: Score) -> String {
    format!("Score: You {} - {} Computer", score.player, score.computer)
}

/// One row of the outcome table, e.g. `rock vs scissors = player`.
pub fn format_outcome_row(player: Move, computer: Move, outcome: Outcome) -> String {
    format!("{} vs {} = {}", player.as_str(), computer.as_str(), outcome)
}

pub fn format_frequency(m: Move, count: u64, total: u64) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    };
    format!("{:<8}  {:>9}  {:>6.2}%", m.as_str(), count, pct)
}
