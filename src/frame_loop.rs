//! The frame loop: sample input, run one simulation step, persist, render.
//!
//! One simulation step per displayed frame. Elapsed time is measured and
//! handed to the step, but movement uses fixed per-frame increments.

use std::io;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::Terminal;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::game::{
    self, Controllers, FrameInput, GameState, InputAction, MatchCommand,
    PlayerInput, StepEvents,
};
use crate::storage::HighscoreStore;
use crate::ui;

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Sleeps for whatever is left of `frame_duration` since `frame_start`.
pub fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}

fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_millis(1000 / target_fps.clamp(1, 1000))
}

/// Write a freshly beaten highscore. Failures are logged, never fatal.
pub fn persist_highscore(store: &mut dyn HighscoreStore, events: &StepEvents) {
    if let Some(highscore) = events.new_highscore {
        if let Err(e) = store.save(highscore) {
            warn!("Failed to save highscore {}: {}", highscore, e);
        }
    }
}

/// Sort this frame's actions into match commands and player input.
/// Returns false when the player asked to quit.
pub fn route_actions(
    actions: &[InputAction],
    commands: &mut Vec<MatchCommand>,
    player: &mut PlayerInput,
    area_height: u16,
    now: Instant,
) -> bool {
    for action in actions {
        match *action {
            InputAction::Quit => return false,
            InputAction::Command(command) => commands.push(command),
            InputAction::Press(direction) => player.press(direction, now),
            InputAction::Release(direction) => player.release(direction),
            InputAction::PointerMoved { row } => {
                if let Some(y) = ui::field_y_for_row(area_height, row) {
                    player.record_pointer(y, now);
                }
            }
        }
    }
    true
}

/// Run the game until the player quits
pub fn run_game<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    store: &mut dyn HighscoreStore,
    reports_release: bool,
) -> Result<(), io::Error> {
    let mut rng = StdRng::from_entropy();
    let mut state = GameState::new(store.load(), &mut rng);
    let mut controllers = Controllers::human_vs_cpu();
    let mut player = PlayerInput::new(reports_release);
    let mut hud = ui::hud::status_line(&state);

    info!(
        "Game start: {} vs {}, highscore {}",
        controllers.left.name(),
        controllers.right.name(),
        state.highscore
    );

    let frame_duration = frame_duration(config.display.target_fps);
    let mut last_frame = Instant::now();
    let mut commands = Vec::new();

    loop {
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        last_frame = now;

        let size = terminal.size()?;
        let actions = game::poll_input(&config.keybindings)?;
        commands.clear();
        if !route_actions(&actions, &mut commands, &mut player, size.height, now) {
            info!("Quit requested");
            return Ok(());
        }

        let frame = FrameInput {
            commands: &commands,
            player: &player,
            now,
            elapsed,
        };
        let events = game::step(&mut state, &mut controllers, &frame, &mut rng);

        if events.physics.any() {
            debug!("Frame events: {:?}", events);
        }
        persist_highscore(store, &events);
        if events.hud_changed() {
            hud = ui::hud::status_line(&state);
        }

        let ctx = ui::RenderContext {
            display: &config.display,
            keys: &config.keybindings,
            hud: &hud,
            now,
        };
        terminal.draw(|f| ui::render(f, &state, &ctx))?;

        limit_frame_rate(now, frame_duration);
    }
}
