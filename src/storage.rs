// Highscore persistence: a single integer in a small text file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Key-value store for the one persisted integer
pub trait HighscoreStore {
    /// Stored highscore, 0 when absent or unreadable
    fn load(&self) -> u32;

    fn save(&mut self, highscore: u32) -> io::Result<()>;
}

/// Default location: `<data_dir>/levelpong/highscore`
pub fn default_highscore_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("levelpong");
    path.push("highscore");
    path
}

/// Highscore kept in a plain text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreStore for FileStore {
    fn load(&self) -> u32 {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No highscore at {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match contents.trim().parse() {
            Ok(highscore) => highscore,
            Err(e) => {
                warn!(
                    "Ignoring unreadable highscore in {}: {}",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    fn save(&mut self, highscore: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{}\n", highscore))?;
        debug!("Saved highscore {} to {}", highscore, self.path.display());
        Ok(())
    }
}
