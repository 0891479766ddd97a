pub mod control;
pub mod input;
pub mod levels;
pub mod physics;
pub mod rules;
pub mod state;

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

pub use control::{ControlContext, Controllers, PaddleControl};
pub use input::{poll_input, InputAction, MatchCommand, PlayerInput};
pub use physics::PhysicsEvents;
pub use state::{Ball, GameState, Paddle, Phase, Side};

// Frames slower than this are logged
const FRAME_STALL: Duration = Duration::from_millis(100);

/// Inputs for one frame
pub struct FrameInput<'a> {
    /// Match commands queued since the previous frame, in arrival order
    pub commands: &'a [MatchCommand],
    pub player: &'a PlayerInput,
    pub now: Instant,
    /// Time since the previous frame. Movement uses fixed per-frame
    /// increments, so this is informational only.
    pub elapsed: Duration,
}

/// Everything that happened during one step
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepEvents {
    pub physics: PhysicsEvents,
    pub restarted: bool,
    pub level_up: bool,
    pub game_over: bool,
    pub new_highscore: Option<u32>,
}

impl StepEvents {
    /// Whether the HUD status line needs recomputing
    pub fn hud_changed(&self) -> bool {
        self.physics.goal.is_some()
            || self.restarted
            || self.level_up
            || self.game_over
            || self.new_highscore.is_some()
    }
}

/// Advance the match by one frame. This is the only place game state
/// changes: queued commands first, then paddles, ball and scoring.
pub fn step<R: Rng>(
    state: &mut GameState,
    controllers: &mut Controllers,
    frame: &FrameInput,
    rng: &mut R,
) -> StepEvents {
    let mut events = StepEvents::default();

    if frame.elapsed > FRAME_STALL {
        debug!("Slow frame: {:?} since the previous step", frame.elapsed);
    }

    for command in frame.commands {
        if rules::apply_command(state, *command, rng) {
            events.restarted = true;
        }
    }

    rules::expire_transition(state, frame.now);
    if state.is_paused() || state.in_transition() || state.is_game_over() {
        return events;
    }

    let ctx = ControlContext {
        ball: &state.ball,
        input: frame.player,
        now: frame.now,
    };
    control::drive(controllers.left.as_mut(), &mut state.left_paddle, &ctx);
    control::drive(controllers.right.as_mut(), &mut state.right_paddle, &ctx);

    let base_speed = state.setting().ball_speed;
    events.physics = physics::update_ball(
        &mut state.ball,
        &state.left_paddle,
        &state.right_paddle,
        base_speed,
    );

    if let Some(conceded) = events.physics.goal {
        let outcome = rules::award_point(state, conceded, frame.now, rng);
        events.level_up = outcome.level_up;
        events.game_over = outcome.game_over;
        events.new_highscore = outcome.new_highscore;
    }

    events
}
