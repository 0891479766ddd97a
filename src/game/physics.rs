use std::f32::consts::PI;

use super::state::{Ball, Paddle, Side, FIELD_HEIGHT, FIELD_WIDTH};

// Edge hits leave at up to 60 degrees
const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;
// Speed multiplier per paddle hit
const SPEED_INCREASE: f32 = 1.02;
// Ball speed never exceeds this multiple of the level's base speed
const MAX_SPEED_FACTOR: f32 = 1.5;
// Gap left between ball and paddle after a bounce
const SEPARATION: f32 = 0.1;

/// What happened to the ball during one physics step
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub wall_collision: bool,
    pub paddle_collision: Option<Side>,
    /// Side whose edge the ball left through (that side concedes)
    pub goal: Option<Side>,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.wall_collision || self.paddle_collision.is_some() || self.goal.is_some()
    }
}

/// Advance the ball one frame and resolve walls, paddles and goals.
/// `base_speed` is the current level's ball speed, used for the speed cap.
pub fn update_ball(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    base_speed: f32,
) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    ball.x += ball.dx;
    ball.y += ball.dy;

    events.wall_collision = bounce_off_walls(ball);

    if ball.moving_left() && hits_paddle(ball, left) {
        bounce_off_paddle(ball, left, base_speed);
        events.paddle_collision = Some(Side::Left);
    }
    if ball.moving_right() && hits_paddle(ball, right) {
        bounce_off_paddle(ball, right, base_speed);
        events.paddle_collision = Some(Side::Right);
    }

    events.goal = goal_conceded(ball);
    events
}

/// Reflect off the top and bottom walls. Returns true on contact.
pub fn bounce_off_walls(ball: &mut Ball) -> bool {
    if ball.y - ball.radius <= 0.0 {
        ball.y = ball.radius;
        ball.dy = -ball.dy;
        true
    } else if ball.y + ball.radius >= FIELD_HEIGHT {
        ball.y = FIELD_HEIGHT - ball.radius;
        ball.dy = -ball.dy;
        true
    } else {
        false
    }
}

/// Circle vs rectangle: closest point on the paddle to the ball centre
/// must lie within the radius.
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let nearest_x = ball.x.clamp(paddle.x, paddle.x + paddle.width);
    let nearest_y = ball.y.clamp(paddle.y, paddle.y + paddle.height);
    let dx = ball.x - nearest_x;
    let dy = ball.y - nearest_y;
    dx * dx + dy * dy <= ball.radius * ball.radius
}

pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, base_speed: f32) {
    // Push the ball clear of the facing edge so it can't re-collide
    ball.x = match paddle.side {
        Side::Left => paddle.x + paddle.width + ball.radius + SEPARATION,
        Side::Right => paddle.x - ball.radius - SEPARATION,
    };

    // Where on the paddle the ball hit: -1.0 = top edge, 1.0 = bottom edge
    let rel = ((ball.y - paddle.center_y()) / (paddle.height / 2.0)).clamp(-1.0, 1.0);
    let angle = rel * MAX_BOUNCE_ANGLE;

    ball.speed = (ball.speed * SPEED_INCREASE).min(base_speed * MAX_SPEED_FACTOR);

    let outward = ball.speed * angle.cos();
    ball.dx = match paddle.side {
        Side::Left => outward.abs(),
        Side::Right => -outward.abs(),
    };
    ball.dy = angle.sin() * ball.speed;
}

/// Side that conceded, once the ball is entirely past an edge
pub fn goal_conceded(ball: &Ball) -> Option<Side> {
    if ball.x + ball.radius < 0.0 {
        Some(Side::Left)
    } else if ball.x - ball.radius > FIELD_WIDTH {
        Some(Side::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        let mut ball = Ball::new(x, y);
        ball.dx = dx;
        ball.dy = dy;
        ball.speed = dx.hypot(dy);
        ball
    }

    fn paddles() -> (Paddle, Paddle) {
        (
            Paddle::new(Side::Left, 110.0, 0.0),
            Paddle::new(Side::Right, 110.0, 5.0),
        )
    }

    #[test]
    fn test_centre_hit_on_left_paddle_goes_straight_back() {
        let (left, _) = paddles();
        let mut ball = ball_at(left.x + left.width + 4.0, left.center_y(), -5.0, 0.0);

        assert!(hits_paddle(&ball, &left));
        bounce_off_paddle(&mut ball, &left, 5.0);

        assert!(ball.dy.abs() < 1e-5);
        assert!(ball.dx > 0.0);
        assert!((ball.dx.hypot(ball.dy) - 5.1).abs() < 1e-4);
        assert!((ball.speed - 5.1).abs() < 1e-4);
        assert!(ball.x > left.x + left.width + ball.radius);
    }

    #[test]
    fn test_edge_hit_on_right_paddle_is_steep_and_leftward() {
        let (_, right) = paddles();
        let mut ball = ball_at(right.x - 4.0, right.y + right.height, 5.0, 0.0);

        assert!(hits_paddle(&ball, &right));
        bounce_off_paddle(&mut ball, &right, 5.0);

        assert!(ball.dx < 0.0);
        assert!(ball.dy > 0.0);
        // rel = 1.0 -> 60 degrees
        let angle = (ball.dy / ball.speed).asin();
        assert!((angle - MAX_BOUNCE_ANGLE).abs() < 1e-4);
        assert!(ball.x + ball.radius < right.x);
    }

    #[test]
    fn test_speed_is_capped() {
        let (left, _) = paddles();
        let mut ball = ball_at(left.x + left.width + 2.0, left.center_y(), -7.4, 0.0);

        for _ in 0..50 {
            ball.dx = -ball.dx.abs();
            ball.x = left.x + left.width + 2.0;
            bounce_off_paddle(&mut ball, &left, 5.0);
        }

        assert!((ball.speed - 7.5).abs() < 1e-4);
        assert!((ball.dx.hypot(ball.dy) - 7.5).abs() < 1e-3);
    }

    #[test]
    fn test_bounce_keeps_velocity_consistent_with_speed() {
        let (left, right) = paddles();
        for offset in [-60.0, -30.0, -5.0, 0.0, 12.0, 40.0, 62.0] {
            let mut ball = ball_at(left.x + left.width, left.center_y() + offset, -5.0, 1.0);
            bounce_off_paddle(&mut ball, &left, 5.0);
            assert!((ball.dx.hypot(ball.dy) - ball.speed).abs() < 1e-3);
            assert!(ball.dx > 0.0);

            let mut ball = ball_at(right.x, right.center_y() + offset, 5.0, 1.0);
            bounce_off_paddle(&mut ball, &right, 5.0);
            assert!((ball.dx.hypot(ball.dy) - ball.speed).abs() < 1e-3);
            assert!(ball.dx < 0.0);
        }
    }

    #[test]
    fn test_paddle_ignored_when_ball_moving_away() {
        let (left, right) = paddles();
        // Overlapping the left paddle but already heading right
        let mut ball = ball_at(left.x + left.width, left.center_y(), 5.0, 0.0);
        ball.x -= ball.dx;

        let events = update_ball(&mut ball, &left, &right, 5.0);

        assert_eq!(events.paddle_collision, None);
        assert_eq!(ball.dx, 5.0);
    }

    #[test]
    fn test_miss_by_a_corner() {
        let (left, _) = paddles();
        // Diagonal distance from the top-right corner is just over the radius
        let ball = ball_at(left.x + left.width + 6.0, left.y - 6.0, -5.0, 0.0);
        assert!(!hits_paddle(&ball, &left));

        let ball = ball_at(left.x + left.width + 5.0, left.y - 5.0, -5.0, 0.0);
        assert!(hits_paddle(&ball, &left));
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut ball = ball_at(300.0, 5.0, 3.0, -4.0);
        assert!(bounce_off_walls(&mut ball));
        assert_eq!(ball.y, ball.radius);
        assert_eq!(ball.dy, 4.0);
        assert_eq!(ball.dx, 3.0);
    }

    #[test]
    fn test_bottom_wall_reflects() {
        let mut ball = ball_at(300.0, FIELD_HEIGHT - 2.0, 3.0, 4.0);
        assert!(bounce_off_walls(&mut ball));
        assert_eq!(ball.y, FIELD_HEIGHT - ball.radius);
        assert_eq!(ball.dy, -4.0);
    }

    #[test]
    fn test_goal_needs_whole_ball_past_edge() {
        let ball = ball_at(FIELD_WIDTH + 8.0, 200.0, 5.0, 0.0);
        assert_eq!(goal_conceded(&ball), None);

        let ball = ball_at(FIELD_WIDTH + 8.5, 200.0, 5.0, 0.0);
        assert_eq!(goal_conceded(&ball), Some(Side::Right));

        let ball = ball_at(-8.5, 200.0, -5.0, 0.0);
        assert_eq!(goal_conceded(&ball), Some(Side::Left));
    }

    #[test]
    fn test_update_moves_ball_by_velocity() {
        let (left, right) = paddles();
        let mut ball = ball_at(320.0, 240.0, 5.0, -2.0);

        let events = update_ball(&mut ball, &left, &right, 5.0);

        assert!(!events.any());
        assert_eq!(ball.x, 325.0);
        assert_eq!(ball.y, 238.0);
    }
}
