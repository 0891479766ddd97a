// Difficulty tiers, from "Beginner" up to "Legend"

/// Settings applied when a level starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSetting {
    pub name: &'static str,
    pub ball_speed: f32,
    pub cpu_speed: f32,
    pub paddle_height: f32,
    pub points_to_advance: u32,
}

const fn tier(
    name: &'static str,
    speed: f32,
    paddle_height: f32,
    points_to_advance: u32,
) -> LevelSetting {
    LevelSetting {
        name,
        ball_speed: speed,
        cpu_speed: speed,
        paddle_height,
        points_to_advance,
    }
}

pub const LEVELS: [LevelSetting; 10] = [
    tier("Beginner", 5.0, 110.0, 3),
    tier("Novice", 5.5, 100.0, 3),
    tier("Rookie", 6.0, 90.0, 3),
    tier("Amateur", 6.5, 80.0, 4),
    tier("Intermediate", 7.0, 75.0, 4),
    tier("Skilled", 7.5, 70.0, 4),
    tier("Advanced", 8.0, 65.0, 5),
    tier("Expert", 8.5, 60.0, 5),
    tier("Master", 9.0, 55.0, 5),
    tier("Legend", 10.0, 50.0, 6),
];

pub const FIRST_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = LEVELS.len() as u8;

/// Look up the settings for a 1-based level number.
/// Out-of-range numbers clamp to the nearest tier.
pub fn level_setting(level: u8) -> &'static LevelSetting {
    let index = level.clamp(FIRST_LEVEL, MAX_LEVEL) - 1;
    &LEVELS[index as usize]
}
