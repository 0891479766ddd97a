// Match and level state machine: scoring, serves, level-ups, game over,
// pause/resume/restart

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use super::input::MatchCommand;
use super::levels::{FIRST_LEVEL, MAX_LEVEL};
use super::state::{GameState, Phase, Side};

// How long the game stays frozen after a level-up
pub const LEVEL_TRANSITION: Duration = Duration::from_millis(1000);

/// Direction of the next serve after a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serve {
    TowardLeft,
    TowardRight,
    Random,
}

/// Outcome of a single point
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointOutcome {
    pub level_up: bool,
    pub game_over: bool,
    /// Set when this point's game over beat the stored highscore
    pub new_highscore: Option<u32>,
}

/// Serve direction after `scorer` wins a point.
/// The opponent's points always send the ball right, the player's points
/// send it left, except after a level-up where the direction is random.
pub fn serve_after_point(scorer: Side, level_up: bool) -> Serve {
    match (scorer, level_up) {
        (Side::Right, _) => Serve::TowardRight,
        (Side::Left, false) => Serve::TowardLeft,
        (Side::Left, true) => Serve::Random,
    }
}

pub fn serve<R: Rng>(state: &mut GameState, serve: Serve, rng: &mut R) {
    let toward_right = match serve {
        Serve::TowardLeft => false,
        Serve::TowardRight => true,
        Serve::Random => rng.gen_bool(0.5),
    };
    state.serve(toward_right, rng);
}

/// Credit a point to the side opposite `conceded`, then handle level
/// progression and re-serve. Called once per ball-exit.
pub fn award_point<R: Rng>(
    state: &mut GameState,
    conceded: Side,
    now: Instant,
    rng: &mut R,
) -> PointOutcome {
    let scorer = conceded.opposite();
    let mut outcome = PointOutcome::default();

    match scorer {
        Side::Right => {
            state.right_score += 1;
        }
        Side::Left => {
            state.left_score += 1;
            state.points_in_level += 1;

            if state.points_in_level >= state.setting().points_to_advance {
                if state.level < MAX_LEVEL {
                    level_up(state, now);
                    outcome.level_up = true;
                } else {
                    outcome.new_highscore = game_over(state);
                    outcome.game_over = true;
                }
            }
        }
    }

    debug!(
        "Point to {:?}: {}-{} (level {}, {} in level)",
        scorer, state.left_score, state.right_score, state.level, state.points_in_level
    );

    serve(state, serve_after_point(scorer, outcome.level_up), rng);
    outcome
}

/// Advance one level, apply its settings and start the transition pause.
/// No-op on the last level.
pub fn level_up(state: &mut GameState, now: Instant) {
    if state.level >= MAX_LEVEL {
        return;
    }
    state.level += 1;
    state.apply_level_settings();
    state.phase = Phase::LevelTransition { since: now };
    info!("Level up: {} ({})", state.level, state.setting().name);
}

/// Enter game over and update the highscore.
/// Returns the new highscore when it was beaten.
pub fn game_over(state: &mut GameState) -> Option<u32> {
    state.phase = Phase::GameOver;
    info!(
        "Game over at level {} with {}-{}",
        state.level, state.left_score, state.right_score
    );

    if state.left_score > state.highscore {
        state.highscore = state.left_score;
        info!("New highscore: {}", state.highscore);
        Some(state.highscore)
    } else {
        None
    }
}

/// Back to level 1 at 0-0, whatever the current phase.
/// The highscore survives.
pub fn restart<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.left_score = 0;
    state.right_score = 0;
    state.level = FIRST_LEVEL;
    state.apply_level_settings();
    state.left_paddle.center();
    state.right_paddle.center();
    state.phase = Phase::Playing;
    serve(state, Serve::Random, rng);
    info!("Game restarted");
}

/// End the level transition once it has run its course
pub fn expire_transition(state: &mut GameState, now: Instant) -> bool {
    if let Phase::LevelTransition { since } = state.phase {
        if now.saturating_duration_since(since) >= LEVEL_TRANSITION {
            state.phase = Phase::Playing;
            return true;
        }
    }
    false
}

/// Apply a pause or restart command. Returns true if the game restarted.
pub fn apply_command<R: Rng>(state: &mut GameState, command: MatchCommand, rng: &mut R) -> bool {
    match command {
        MatchCommand::TogglePause => {
            state.phase = match state.phase {
                Phase::Playing | Phase::LevelTransition { .. } => Phase::Paused,
                // Resume: unpause, or continue after game over keeping score/level
                Phase::Paused | Phase::GameOver => Phase::Playing,
            };
            debug!("Phase now {:?}", state.phase);
            false
        }
        MatchCommand::Restart => {
            restart(state, rng);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{FIELD_HEIGHT, FIELD_WIDTH};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_game() -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let state = GameState::new(0, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_opponent_point_serves_right() {
        let (mut state, mut rng) = new_game();

        let outcome = award_point(&mut state, Side::Left, Instant::now(), &mut rng);

        assert_eq!(state.right_score, 1);
        assert_eq!(state.left_score, 0);
        assert_eq!(state.points_in_level, 0);
        assert_eq!(outcome, PointOutcome::default());
        assert!(state.ball.dx > 0.0);
    }

    #[test]
    fn test_player_point_serves_left() {
        let (mut state, mut rng) = new_game();

        award_point(&mut state, Side::Right, Instant::now(), &mut rng);

        assert_eq!(state.left_score, 1);
        assert_eq!(state.points_in_level, 1);
        assert!(state.ball.dx < 0.0);
        assert_eq!(state.ball.x, FIELD_WIDTH / 2.0);
        assert_eq!(state.ball.y, FIELD_HEIGHT / 2.0);
    }

    #[test]
    fn test_serve_policy() {
        assert_eq!(serve_after_point(Side::Right, false), Serve::TowardRight);
        assert_eq!(serve_after_point(Side::Right, true), Serve::TowardRight);
        assert_eq!(serve_after_point(Side::Left, false), Serve::TowardLeft);
        assert_eq!(serve_after_point(Side::Left, true), Serve::Random);
    }

    #[test]
    fn test_third_point_levels_up() {
        let (mut state, mut rng) = new_game();

        award_point(&mut state, Side::Right, Instant::now(), &mut rng);
        award_point(&mut state, Side::Right, Instant::now(), &mut rng);
        assert_eq!(state.level, 1);

        let outcome = award_point(&mut state, Side::Right, Instant::now(), &mut rng);

        assert!(outcome.level_up);
        assert_eq!(state.left_score, 3);
        assert_eq!(state.level, 2);
        assert_eq!(state.points_in_level, 0);
        assert_eq!(state.left_paddle.height, 100.0);
        assert_eq!(state.right_paddle.height, 100.0);
        assert_eq!(state.ball.speed, 5.5);
        assert_eq!(state.right_paddle.speed, 5.5);
        assert!(state.in_transition());
    }

    #[test]
    fn test_opponent_points_do_not_count_toward_level() {
        let (mut state, mut rng) = new_game();
        for _ in 0..10 {
            award_point(&mut state, Side::Left, Instant::now(), &mut rng);
        }
        assert_eq!(state.level, 1);
        assert_eq!(state.right_score, 10);
    }

    #[test]
    fn test_level_up_is_noop_on_last_level() {
        let (mut state, _) = new_game();
        state.level = MAX_LEVEL;
        level_up(&mut state, Instant::now());
        assert_eq!(state.level, MAX_LEVEL);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_clearing_last_level_ends_game() {
        let (mut state, mut rng) = new_game();
        state.level = MAX_LEVEL;
        state.apply_level_settings();
        state.left_score = 40;
        state.points_in_level = 5;

        let outcome = award_point(&mut state, Side::Right, Instant::now(), &mut rng);

        assert!(outcome.game_over);
        assert!(!outcome.level_up);
        assert_eq!(outcome.new_highscore, Some(41));
        assert!(state.is_game_over());
        assert_eq!(state.highscore, 41);
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn test_highscore_replaced_only_when_beaten() {
        let (mut state, _) = new_game();
        state.highscore = 15;

        state.left_score = 20;
        assert_eq!(game_over(&mut state), Some(20));
        assert_eq!(state.highscore, 20);

        state.highscore = 15;
        state.left_score = 10;
        assert_eq!(game_over(&mut state), None);
        assert_eq!(state.highscore, 15);

        state.left_score = 15;
        assert_eq!(game_over(&mut state), None);
        assert_eq!(state.highscore, 15);
    }

    #[test]
    fn test_restart_from_anywhere() {
        let (mut state, mut rng) = new_game();
        state.level = 7;
        state.apply_level_settings();
        state.left_score = 12;
        state.right_score = 9;
        state.points_in_level = 2;
        state.highscore = 30;

        for phase in [
            Phase::Paused,
            Phase::GameOver,
            Phase::LevelTransition { since: Instant::now() },
            Phase::Playing,
        ] {
            state.phase = phase;
            assert!(apply_command(&mut state, MatchCommand::Restart, &mut rng));

            assert_eq!(state.level, 1);
            assert_eq!(state.left_score, 0);
            assert_eq!(state.right_score, 0);
            assert_eq!(state.points_in_level, 0);
            assert!(!state.is_game_over());
            assert!(!state.is_paused());
            assert_eq!(state.phase, Phase::Playing);
            assert_eq!(state.highscore, 30);
            assert_eq!(state.left_paddle.height, 110.0);
            assert_eq!(state.left_paddle.y, (FIELD_HEIGHT - 110.0) / 2.0);
            assert_eq!(state.ball.speed, 5.0);

            state.level = 7;
            state.left_score = 12;
        }
    }

    #[test]
    fn test_pause_toggles() {
        let (mut state, mut rng) = new_game();

        apply_command(&mut state, MatchCommand::TogglePause, &mut rng);
        assert!(state.is_paused());
        apply_command(&mut state, MatchCommand::TogglePause, &mut rng);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_resume_after_game_over_keeps_progress() {
        let (mut state, mut rng) = new_game();
        state.level = MAX_LEVEL;
        state.left_score = 33;
        state.right_score = 20;
        state.phase = Phase::GameOver;

        apply_command(&mut state, MatchCommand::TogglePause, &mut rng);

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, MAX_LEVEL);
        assert_eq!(state.left_score, 33);
        assert_eq!(state.right_score, 20);
    }

    #[test]
    fn test_transition_expires_after_a_second() {
        let (mut state, _) = new_game();
        let start = Instant::now();
        level_up(&mut state, start);

        assert!(!expire_transition(&mut state, start + Duration::from_millis(999)));
        assert!(state.in_transition());

        assert!(expire_transition(&mut state, start + LEVEL_TRANSITION));
        assert_eq!(state.phase, Phase::Playing);
    }
}
