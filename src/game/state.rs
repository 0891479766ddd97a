use std::f32::consts::PI;
use std::time::Instant;

use rand::Rng;

use super::levels::{level_setting, LevelSetting, FIRST_LEVEL};

// Virtual coordinate system - the field physics runs in.
// The renderer scales it to whatever terminal size is available.
pub const FIELD_WIDTH: f32 = 640.0;
pub const FIELD_HEIGHT: f32 = 480.0;

pub const PADDLE_WIDTH: f32 = 12.0;
pub const PADDLE_MARGIN: f32 = 10.0; // Gap between paddle and side edge
pub const BALL_RADIUS: f32 = 8.0;

// Serve angle is drawn from [-SERVE_ANGLE, SERVE_ANGLE] radians (~40 degrees)
const SERVE_ANGLE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            radius: BALL_RADIUS,
            speed: 0.0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Place the ball at (x, y) with the given speed, travelling at `angle`
    /// (radians, 0 = rightward, PI = leftward).
    pub fn launch(&mut self, x: f32, y: f32, angle: f32, speed: f32) {
        self.x = x;
        self.y = y;
        self.speed = speed;
        self.dx = angle.cos() * speed;
        self.dy = angle.sin() * speed;
    }

    pub fn moving_left(&self) -> bool {
        self.dx < 0.0
    }

    pub fn moving_right(&self) -> bool {
        self.dx > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Per-frame movement speed, used by the computer opponent
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, height: f32, speed: f32) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => FIELD_WIDTH - PADDLE_WIDTH - PADDLE_MARGIN,
        };
        Self {
            side,
            x,
            y: (FIELD_HEIGHT - height) / 2.0,
            width: PADDLE_WIDTH,
            height,
            speed,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn max_y(&self) -> f32 {
        (FIELD_HEIGHT - self.height).max(0.0)
    }

    /// Move to `y`, clamped so the paddle stays on the field
    pub fn set_y(&mut self, y: f32) {
        self.y = y.clamp(0.0, self.max_y());
    }

    pub fn center(&mut self) {
        self.set_y((FIELD_HEIGHT - self.height) / 2.0);
    }
}

/// Where the match currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Playing,
    Paused,
    /// Frozen after a level-up, returns to Playing on its own
    LevelTransition { since: Instant },
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub left_score: u32,
    pub right_score: u32,
    pub level: u8,
    pub points_in_level: u32,
    pub phase: Phase,
    pub highscore: u32,
}

impl GameState {
    /// Fresh match at level 1 with the ball served in a random direction
    pub fn new<R: Rng>(highscore: u32, rng: &mut R) -> Self {
        let setting = level_setting(FIRST_LEVEL);
        let mut state = Self {
            ball: Ball::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            left_paddle: Paddle::new(Side::Left, setting.paddle_height, 0.0),
            right_paddle: Paddle::new(Side::Right, setting.paddle_height, setting.cpu_speed),
            left_score: 0,
            right_score: 0,
            level: FIRST_LEVEL,
            points_in_level: 0,
            phase: Phase::Playing,
            highscore,
        };
        let toward_right = rng.gen_bool(0.5);
        state.serve(toward_right, rng);
        state
    }

    pub fn setting(&self) -> &'static LevelSetting {
        level_setting(self.level)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn in_transition(&self) -> bool {
        matches!(self.phase, Phase::LevelTransition { .. })
    }

    /// Re-serve from the centre at the level's base speed
    pub fn serve<R: Rng>(&mut self, toward_right: bool, rng: &mut R) {
        let tilt = rng.gen_range(-SERVE_ANGLE..=SERVE_ANGLE);
        let angle = if toward_right { tilt } else { PI - tilt };
        self.ball.launch(
            FIELD_WIDTH / 2.0,
            FIELD_HEIGHT / 2.0,
            angle,
            self.setting().ball_speed,
        );
    }

    /// Apply the current level's ball speed, cpu speed and paddle height.
    /// Paddles keep their position, re-clamped against the new height.
    pub fn apply_level_settings(&mut self) {
        let setting = self.setting();
        self.ball.speed = setting.ball_speed;
        self.right_paddle.speed = setting.cpu_speed;
        for paddle in [&mut self.left_paddle, &mut self.right_paddle] {
            paddle.height = setting.paddle_height;
            let y = paddle.y;
            paddle.set_y(y);
        }
        self.points_in_level = 0;
    }
}
