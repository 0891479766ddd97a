// LevelPong configuration types
// All settings have defaults, so a partial (or missing) file works

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Player paddle controls
    pub move_up: String,
    pub move_down: String,
    pub alt_move_up: String,
    pub alt_move_down: String,

    // Game controls
    pub pause: String, // Also resumes after game over
    pub restart: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: "Up".to_string(),
            move_down: "Down".to_string(),
            alt_move_up: "W".to_string(),
            alt_move_down: "S".to_string(),
            pause: "Space".to_string(),
            restart: "R".to_string(),
            quit: "Q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second (the simulation advances once per frame)
    pub target_fps: u64,

    // Colors as RGB values 0-255
    pub player_color: [u8; 3],
    pub cpu_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub net_color: [u8; 3],
    pub text_color: [u8; 3],
    pub progress_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            player_color: [159, 216, 246],   // Light blue
            cpu_color: [246, 179, 139],      // Peach
            ball_color: [231, 246, 255],     // Near white
            net_color: [18, 50, 68],         // Dark teal
            text_color: [191, 233, 255],     // Pale blue
            progress_color: [56, 189, 248],  // Sky blue
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    // Highscore file; defaults to <data dir>/levelpong/highscore
    pub highscore_path: Option<String>,
}
