// Paddle control: one capability, two sources (human input, computer policy)

use std::time::Instant;

use super::input::{Direction, PlayerInput};
use super::state::{Ball, Paddle};

// Per-frame displacement while a movement key is held
pub const KEY_SPEED: f32 = 6.0;
// Fraction of the remaining distance to the pointer covered per frame
const POINTER_SMOOTHING: f32 = 0.35;

/// Everything a controller may look at when deciding a move
pub struct ControlContext<'a> {
    pub ball: &'a Ball,
    pub input: &'a PlayerInput,
    pub now: Instant,
}

/// Decides where a paddle goes each frame.
///
/// Implementations return the unclamped target y; the caller clamps it
/// onto the field.
pub trait PaddleControl {
    fn next_y(&mut self, paddle: &Paddle, ctx: &ControlContext) -> f32;

    /// Controller name for debugging/display
    fn name(&self) -> &str;
}

/// Apply a controller's decision to its paddle, keeping it on the field
pub fn drive(control: &mut dyn PaddleControl, paddle: &mut Paddle, ctx: &ControlContext) {
    let y = control.next_y(paddle, ctx);
    paddle.set_y(y);
}

/// Keyboard + pointer control for the player's paddle
#[derive(Debug, Default)]
pub struct HumanControl;

impl PaddleControl for HumanControl {
    fn next_y(&mut self, paddle: &Paddle, ctx: &ControlContext) -> f32 {
        let mut y = paddle.y;

        if ctx.input.is_held(Direction::Up, ctx.now) {
            y -= KEY_SPEED;
        }
        if ctx.input.is_held(Direction::Down, ctx.now) {
            y += KEY_SPEED;
        }

        // Smooth toward the pointer so keys still have an effect
        if let Some(pointer_y) = ctx.input.fresh_pointer(ctx.now) {
            let target = pointer_y - paddle.height / 2.0;
            y += (target - y) * POINTER_SMOOTHING;
        }

        y
    }

    fn name(&self) -> &str {
        "Player"
    }
}

/// The two paddle controllers of a match
pub struct Controllers {
    pub left: Box<dyn PaddleControl>,
    pub right: Box<dyn PaddleControl>,
}

impl Controllers {
    pub fn new(left: Box<dyn PaddleControl>, right: Box<dyn PaddleControl>) -> Self {
        Self { left, right }
    }

    /// Human on the left, reactive computer opponent on the right
    pub fn human_vs_cpu() -> Self {
        Self::new(
            Box::new(HumanControl),
            Box::new(crate::ai::ReactiveBot::new()),
        )
    }
}
