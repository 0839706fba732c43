//! JSON file store - high scores and per-player save slots on disk
//!
//! Layout under the data directory:
//!
//! ```text
//! <dir>/high_scores.json        ranked score table, best first
//! <dir>/saves/<name>.json       one saved session per player
//! ```
//!
//! Every write goes to a `.tmp` sibling first and is renamed over the target,
//! so a failed write leaves the previous document in place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub use term_tetris_core as core;
pub use term_tetris_types as types;

use crate::core::{display_name, insert_ranked, Persistence, SavedGame, ScoreRecord};

const HIGH_SCORES_FILE: &str = "high_scores.json";
const SAVES_DIR: &str = "saves";

/// [`Persistence`] backed by JSON documents in a directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (creating if needed) the store rooted at `dir`.
    ///
    /// Safe to call repeatedly; existing data is never touched.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let saves = dir.join(SAVES_DIR);
        fs::create_dir_all(&saves)
            .with_context(|| format!("Failed to create {}", saves.display()))?;
        debug!(dir = %dir.display(), "json store opened");
        Ok(Self { dir })
    }

    fn high_scores_path(&self) -> PathBuf {
        self.dir.join(HIGH_SCORES_FILE)
    }

    fn save_path(&self, player_name: &str) -> PathBuf {
        self.dir
            .join(SAVES_DIR)
            .join(format!("{}.json", encode_file_name(display_name(player_name))))
    }

    fn read_scores(&self) -> Result<Vec<ScoreRecord>> {
        Ok(read_json(&self.high_scores_path())?.unwrap_or_default())
    }
}

impl Persistence for JsonStore {
    fn save_score(
        &mut self,
        player_name: &str,
        score: u32,
        level: u32,
        lines_cleared: u32,
    ) -> Result<()> {
        let mut scores = self.read_scores()?;
        insert_ranked(
            &mut scores,
            ScoreRecord::new(player_name, score, level, lines_cleared),
        );
        write_json_atomic(&self.high_scores_path(), &scores)
    }

    fn get_high_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let mut scores = self.read_scores()?;
        // Hand-edited files may be out of order; stable sort keeps tie order.
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(limit);
        Ok(scores)
    }

    fn save_game(&mut self, player_name: &str, state: &SavedGame) -> Result<()> {
        write_json_atomic(&self.save_path(player_name), state)
    }

    fn load_game(&self, player_name: &str) -> Result<Option<SavedGame>> {
        read_json(&self.save_path(player_name))
    }
}

/// Map a player name to a file stem.
///
/// ASCII letters, digits, `-` and `_` pass through; every other byte becomes
/// `%XX`. Distinct names always map to distinct stems.
pub fn encode_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(value))
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp, data).with_context(|| format!("Failed to write {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        warn!(path = %path.display(), error = %err, "rename failed, removing temp file");
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}
