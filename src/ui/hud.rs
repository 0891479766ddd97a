// HUD status line shown under the field

use crate::game::GameState;

/// Player score, opponent score, level and highscore on one line
pub fn status_line(state: &GameState) -> String {
    format!(
        "Player {} - {} Computer | Level {}: {} | Highscore {}",
        state.left_score,
        state.right_score,
        state.level,
        state.setting().name,
        state.highscore
    )
}

/// Level progress as a ratio for the gauge, capped at 1.0
pub fn level_progress(state: &GameState) -> f64 {
    let needed = state.setting().points_to_advance.max(1);
    (state.points_in_level as f64 / needed as f64).min(1.0)
}
