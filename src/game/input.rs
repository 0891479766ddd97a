use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEventKind};
use std::time::{Duration, Instant};

use crate::config::KeyBindings;

/// Commands that change the match state rather than a paddle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchCommand {
    /// Pause/unpause, or resume after game over
    TogglePause,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Command(MatchCommand),
    Press(Direction),
    Release(Direction),
    /// Pointer moved over the given terminal row
    PointerMoved { row: u16 },
}

// Pointer samples older than this are ignored
pub const POINTER_FRESHNESS: Duration = Duration::from_millis(200);

// Without release events a first press holds the key long enough to bridge
// the terminal's auto-repeat delay, and each repeat extends it a little
const KEY_HOLD_FIRST: Duration = Duration::from_millis(500);
const KEY_HOLD_REPEAT: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyHold {
    Released,
    /// Held until a release event arrives
    Held,
    /// Held until the deadline (terminal does not report releases)
    Until(Instant),
}

impl KeyHold {
    fn is_held(&self, now: Instant) -> bool {
        match self {
            KeyHold::Released => false,
            KeyHold::Held => true,
            KeyHold::Until(deadline) => now < *deadline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub y: f32,
    pub at: Instant,
}

/// Player input of record: held keys and the latest pointer sample
#[derive(Debug, Clone)]
pub struct PlayerInput {
    up: KeyHold,
    down: KeyHold,
    pointer: Option<PointerSample>,
    reports_release: bool,
}

impl PlayerInput {
    /// `reports_release` tells whether the terminal sends key release events
    pub fn new(reports_release: bool) -> Self {
        Self {
            up: KeyHold::Released,
            down: KeyHold::Released,
            pointer: None,
            reports_release,
        }
    }

    pub fn press(&mut self, direction: Direction, now: Instant) {
        if self.reports_release {
            *self.key_mut(direction) = KeyHold::Held;
            return;
        }

        // Without releases, the opposite key is assumed let go
        let opposite = match direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        };
        *self.key_mut(opposite) = KeyHold::Released;

        let hold = if self.is_held(direction, now) {
            KEY_HOLD_REPEAT
        } else {
            KEY_HOLD_FIRST
        };
        *self.key_mut(direction) = KeyHold::Until(now + hold);
    }

    pub fn release(&mut self, direction: Direction) {
        *self.key_mut(direction) = KeyHold::Released;
    }

    pub fn record_pointer(&mut self, y: f32, now: Instant) {
        self.pointer = Some(PointerSample { y, at: now });
    }

    pub fn is_held(&self, direction: Direction, now: Instant) -> bool {
        match direction {
            Direction::Up => self.up.is_held(now),
            Direction::Down => self.down.is_held(now),
        }
    }

    /// Latest pointer y, if it moved within the freshness window
    pub fn fresh_pointer(&self, now: Instant) -> Option<f32> {
        self.pointer
            .filter(|sample| now.saturating_duration_since(sample.at) < POINTER_FRESHNESS)
            .map(|sample| sample.y)
    }

    fn key_mut(&mut self, direction: Direction) -> &mut KeyHold {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }
}

/// Parse a key binding name from the config file.
/// Accepts "Up", "Down", "Left", "Right", "Enter", "Esc", "Space",
/// "Tab", "Backspace" or a single character.
pub fn parse_key(binding: &str) -> Option<KeyCode> {
    match binding.to_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

fn key_matches(binding: &str, code: KeyCode) -> bool {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    parse_key(binding) == Some(code)
}

/// Map a key event to an action using the configured bindings
pub fn map_key(key: KeyEvent, bindings: &KeyBindings) -> Option<InputAction> {
    let direction = if key_matches(&bindings.move_up, key.code)
        || key_matches(&bindings.alt_move_up, key.code)
    {
        Some(Direction::Up)
    } else if key_matches(&bindings.move_down, key.code)
        || key_matches(&bindings.alt_move_down, key.code)
    {
        Some(Direction::Down)
    } else {
        None
    };

    if let Some(direction) = direction {
        return match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(InputAction::Press(direction)),
            KeyEventKind::Release => Some(InputAction::Release(direction)),
        };
    }

    // Everything else reacts to presses only
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.code == KeyCode::Esc || key_matches(&bindings.quit, key.code) {
        Some(InputAction::Quit)
    } else if key_matches(&bindings.pause, key.code) {
        Some(InputAction::Command(MatchCommand::TogglePause))
    } else if key_matches(&bindings.restart, key.code) {
        Some(InputAction::Command(MatchCommand::Restart))
    } else {
        None
    }
}

/// Drain every pending terminal event and return the resulting actions
pub fn poll_input(bindings: &KeyBindings) -> Result<Vec<InputAction>, std::io::Error> {
    let mut actions = Vec::new();

    while event::poll(Duration::from_millis(0))? {
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = map_key(key, bindings) {
                    actions.push(action);
                }
            }
            Event::Mouse(mouse) => {
                if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                    actions.push(InputAction::PointerMoved { row: mouse.row });
                }
            }
            _ => {}
        }
    }

    Ok(actions)
}
