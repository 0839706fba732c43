//! Persistence contract - high scores and per-player save slots
//!
//! The session talks to storage only through [`Persistence`]. Backends decide
//! where bytes live; the ranking rules are shared through [`insert_ranked`].

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::save::SavedGame;
use crate::types::{Grade, DEFAULT_PLAYER_NAME, HIGH_SCORE_RETENTION};

/// One row of the high score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub grade: Grade,
    pub date_time: DateTime<Utc>,
}

impl ScoreRecord {
    /// New record stamped `now`, with the grade derived from `score`.
    pub fn new(player_name: &str, score: u32, level: u32, lines_cleared: u32) -> Self {
        Self {
            player_name: display_name(player_name).to_string(),
            score,
            level,
            lines_cleared,
            grade: Grade::from_score(score),
            date_time: Utc::now(),
        }
    }
}

/// Storage backend for scores and saved sessions.
///
/// All calls are synchronous. Failures are reported, never panicked on, and
/// must not leave partially written data behind.
pub trait Persistence {
    /// Append a ranked score record.
    fn save_score(&mut self, player_name: &str, score: u32, level: u32, lines_cleared: u32)
        -> Result<()>;

    /// Up to `limit` records, highest score first.
    fn get_high_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>>;

    /// Store `state` in the player's slot, replacing any previous save.
    fn save_game(&mut self, player_name: &str, state: &SavedGame) -> Result<()>;

    /// The player's saved state, or `None` if the slot is empty.
    fn load_game(&self, player_name: &str) -> Result<Option<SavedGame>>;
}

/// Name under which records and slots are filed.
pub fn display_name(player_name: &str) -> &str {
    let trimmed = player_name.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME
    } else {
        trimmed
    }
}

/// Insert `record` keeping `records` sorted by score, descending.
///
/// Ties keep insertion order (older first). The table is cut to the
/// retention limit.
pub fn insert_ranked(records: &mut Vec<ScoreRecord>, record: ScoreRecord) {
    let pos = records
        .iter()
        .position(|r| r.score < record.score)
        .unwrap_or(records.len());
    records.insert(pos, record);
    records.truncate(HIGH_SCORE_RETENTION);
}

/// Volatile backend; used by tests and when no data directory is usable.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    scores: Vec<ScoreRecord>,
    saves: HashMap<String, SavedGame>,
    score_writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_score` calls accepted so far.
    pub fn score_writes(&self) -> usize {
        self.score_writes
    }
}

impl Persistence for MemoryStore {
    fn save_score(
        &mut self,
        player_name: &str,
        score: u32,
        level: u32,
        lines_cleared: u32,
    ) -> Result<()> {
        self.score_writes += 1;
        insert_ranked(
            &mut self.scores,
            ScoreRecord::new(player_name, score, level, lines_cleared),
        );
        Ok(())
    }

    fn get_high_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        Ok(self.scores.iter().take(limit).cloned().collect())
    }

    fn save_game(&mut self, player_name: &str, state: &SavedGame) -> Result<()> {
        self.saves
            .insert(display_name(player_name).to_string(), state.clone());
        Ok(())
    }

    fn load_game(&self, player_name: &str) -> Result<Option<SavedGame>> {
        Ok(self.saves.get(display_name(player_name)).cloned())
    }
}
