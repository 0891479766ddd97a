mod ai;
mod config;
mod debug;
mod frame_loop;
mod game;
mod storage;
mod ui;

use anyhow::Context;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use storage::{FileStore, HighscoreStore};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    debug: bool,
    reset_highscore: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--reset-highscore" => options.reset_highscore = true,
            "--help" | "-h" => options.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn print_usage(program: &str) {
    println!("LevelPong - Terminal Pong with ten levels");
    println!();
    println!("Usage:");
    println!("  {}                      # Play against the computer", program);
    println!(
        "  {} --debug              # Log to {}",
        program,
        debug::LOG_FILE_PATH
    );
    println!("  {} --reset-highscore    # Clear the stored highscore", program);
    println!();
    println!("Controls: arrow keys or W/S, or move the mouse over the field.");
    println!("          Space pauses, R restarts, Q or Esc quits.");
    println!();
    println!("Config: {}", config::get_config_path().display());
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("levelpong");
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            print_usage(program);
            std::process::exit(1);
        }
    };
    if options.help {
        print_usage(program);
        return Ok(());
    }

    let config = config::load_config().context("Failed to load configuration")?;
    debug::init(options.debug).context("Failed to initialize debug log")?;

    let highscore_path = config
        .storage
        .highscore_path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(storage::default_highscore_path);
    let mut store = FileStore::new(highscore_path);
    info!("Highscore file: {}", store.path().display());

    if options.reset_highscore {
        store
            .save(0)
            .with_context(|| format!("Failed to reset {}", store.path().display()))?;
        println!("Highscore reset.");
        return Ok(());
    }

    // Key release events are only reported with the enhancement protocol
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    info!("Key release events: {}", reports_release);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = frame_loop::run_game(&mut terminal, &config, &mut store, reports_release);

    // Restore terminal before any error propagates
    let restored = restore_terminal(terminal.backend_mut(), reports_release);

    result.context("Game loop failed")?;
    restored.context("Failed to restore terminal")
}

/// Undo the terminal setup. Every step runs even if an earlier one
/// fails; the first error is returned.
fn restore_terminal<W: Write>(out: &mut W, pop_keyboard_flags: bool) -> io::Result<()> {
    let popped = if pop_keyboard_flags {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture);
    let cursor = execute!(out, Show);

    popped.and(raw).and(screen).and(cursor)
}
