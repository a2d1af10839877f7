//! High score persistence collaborator
//!
//! The simulation only reports a new best; storing it is up to a
//! [`HighScoreStore`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Where the best score lives between sessions
pub trait HighScoreStore {
    fn high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64) -> Result<(), PersistError>;
}

/// Volatile store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    best: u64,
}

impl MemoryHighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn high_score(&self) -> u64 {
        self.best
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistError> {
        self.best = self.best.max(score);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    score: u64,
}

/// JSON file store. Reads once on open; writes through on every new best.
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
    best: u64,
}

impl FileHighScore {
    /// Open the store. A missing or unreadable file starts from zero.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match persistence::load_json::<HighScoreRecord>(&path) {
            Ok(Some(record)) => {
                log::info!("Loaded high score {}", record.score);
                record.score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score at {}: {e}", path.display());
                0
            }
        };
        Self { path, best }
    }
}

impl HighScoreStore for FileHighScore {
    fn high_score(&self) -> u64 {
        self.best
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistError> {
        if score <= self.best {
            return Ok(());
        }
        self.best = score;
        persistence::save_json(&self.path, &HighScoreRecord { score })
    }
}
