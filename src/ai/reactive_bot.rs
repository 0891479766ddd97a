// Reactive bot - the computer opponent on the right

use crate::game::control::{ControlContext, PaddleControl};
use crate::game::state::{Paddle, FIELD_HEIGHT, FIELD_WIDTH};

/// Tracks the ball with no lookahead:
/// - Chases the ball's y while it approaches, or while it is near the net
/// - Drifts back to the vertical centre when the ball is heading away
/// - Holds still inside a small dead zone to avoid jitter
///
/// Chase speed comes from the paddle itself, so it follows the level table.
pub struct ReactiveBot {
    name: String,
    center_zone: f32,   // Ball this close to the net is always tracked
    dead_zone: f32,     // How far from target before moving
    recenter_rate: f32, // Fraction of the way back to centre per frame
}

impl ReactiveBot {
    pub fn new() -> Self {
        Self {
            name: "Computer".to_string(),
            center_zone: 60.0,
            dead_zone: 4.0,
            recenter_rate: 0.03,
        }
    }
}

impl Default for ReactiveBot {
    fn default() -> Self {
        Self::new()
    }
}

impl PaddleControl for ReactiveBot {
    fn next_y(&mut self, paddle: &Paddle, ctx: &ControlContext) -> f32 {
        let ball = ctx.ball;
        let near_net = (ball.x - FIELD_WIDTH / 2.0).abs() < self.center_zone;

        if ball.moving_right() || near_net {
            let diff = ball.y - paddle.center_y();
            if diff.abs() <= self.dead_zone {
                paddle.y
            } else if diff > 0.0 {
                paddle.y + paddle.speed
            } else {
                paddle.y - paddle.speed
            }
        } else {
            let home = FIELD_HEIGHT / 2.0 - paddle.height / 2.0;
            paddle.y + (home - paddle.y) * self.recenter_rate
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::control::drive;
    use crate::game::input::PlayerInput;
    use crate::game::state::{Ball, Side};
    use std::time::Instant;

    fn ball(x: f32, y: f32, dx: f32) -> Ball {
        let mut ball = Ball::new(x, y);
        ball.dx = dx;
        ball
    }

    fn cpu_paddle(y: f32) -> Paddle {
        let mut paddle = Paddle::new(Side::Right, 110.0, 5.0);
        paddle.set_y(y);
        paddle
    }

    fn step(bot: &mut ReactiveBot, paddle: &mut Paddle, ball: &Ball) {
        let input = PlayerInput::new(true);
        let ctx = ControlContext {
            ball,
            input: &input,
            now: Instant::now(),
        };
        drive(bot, paddle, &ctx);
    }

    #[test]
    fn test_chases_approaching_ball() {
        let mut bot = ReactiveBot::new();
        let mut paddle = cpu_paddle(100.0); // centre at 155

        step(&mut bot, &mut paddle, &ball(500.0, 400.0, 5.0));
        assert_eq!(paddle.y, 105.0);

        step(&mut bot, &mut paddle, &ball(500.0, 20.0, 5.0));
        assert_eq!(paddle.y, 100.0);
    }

    #[test]
    fn test_dead_zone_holds_still() {
        let mut bot = ReactiveBot::new();
        let mut paddle = cpu_paddle(100.0);

        step(&mut bot, &mut paddle, &ball(500.0, 158.0, 5.0));
        assert_eq!(paddle.y, 100.0);

        step(&mut bot, &mut paddle, &ball(500.0, 159.5, 5.0));
        assert_eq!(paddle.y, 105.0);
    }

    #[test]
    fn test_tracks_receding_ball_near_net() {
        let mut bot = ReactiveBot::new();
        let mut paddle = cpu_paddle(100.0);

        step(&mut bot, &mut paddle, &ball(FIELD_WIDTH / 2.0 - 30.0, 400.0, -5.0));
        assert_eq!(paddle.y, 105.0);
    }

    #[test]
    fn test_recenters_when_ball_recedes() {
        let mut bot = ReactiveBot::new();
        let mut paddle = cpu_paddle(0.0);
        let home = FIELD_HEIGHT / 2.0 - 55.0;

        step(&mut bot, &mut paddle, &ball(100.0, 400.0, -5.0));
        assert!((paddle.y - home * 0.03).abs() < 1e-4);

        for _ in 0..500 {
            step(&mut bot, &mut paddle, &ball(100.0, 400.0, -5.0));
        }
        assert!((paddle.y - home).abs() < 0.5);
    }

    #[test]
    fn test_never_leaves_field() {
        let mut bot = ReactiveBot::new();
        let mut paddle = cpu_paddle(0.0);

        for _ in 0..300 {
            step(&mut bot, &mut paddle, &ball(500.0, FIELD_HEIGHT, 5.0));
        }
        assert_eq!(paddle.y, FIELD_HEIGHT - paddle.height);

        for _ in 0..300 {
            step(&mut bot, &mut paddle, &ball(500.0, 0.0, 5.0));
        }
        assert_eq!(paddle.y, 0.0);
    }
}
