//! Persistent top-five leaderboard.
//!
//! Stored as JSON next to the binary's working directory. A missing or
//! unreadable file starts an empty board rather than failing the game.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::LEADERBOARD_SIZE;

/// Default leaderboard file name.
pub const SCORES_FILE: &str = "cascade_scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Top scores, highest first, at most [`LEADERBOARD_SIZE`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Load from `path`. A missing file yields an empty board; a corrupt
    /// file is an error so a typoed hand edit does not silently wipe scores.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading scores from {}", path.display()))?;
        let mut board: Self = serde_json::from_str(&data)
            .with_context(|| format!("parsing scores in {}", path.display()))?;
        board.normalize();
        Ok(board)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("writing scores to {}", path.display()))
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Whether `score` would earn a spot on the board.
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < LEADERBOARD_SIZE
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Insert a score, keeping the board sorted and trimmed.
    pub fn insert(&mut self, name: &str, score: u32) {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
        self.normalize();
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
    }
}
