//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const DATA_DIR_NAME: &str = ".term-tetris";
const DEFAULT_FPS: u32 = 60;
const MIN_FPS: u32 = 10;
const MAX_FPS: u32 = 240;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `high_scores.json` and `saves/`
    pub data_dir: PathBuf,
    /// Frame rate of the main loop
    pub fps: u32,
    /// Fixed seed for the piece sequence; random when unset
    pub seed: Option<u32>,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
    pub log_level: String,
    /// Start with sound muted
    pub muted: bool,
}

impl Config {
    /// Read `TETRIS_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let data_dir = non_empty("TETRIS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| match non_empty("HOME") {
                Some(home) => PathBuf::from(home).join(DATA_DIR_NAME),
                None => PathBuf::from(".").join(DATA_DIR_NAME),
            });

        let fps = non_empty("TETRIS_FPS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_FPS)
            .clamp(MIN_FPS, MAX_FPS);

        let seed = non_empty("TETRIS_SEED").and_then(|s| s.parse().ok());
        let log_path = non_empty("TETRIS_LOG").map(PathBuf::from);
        let log_level = non_empty("TETRIS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let muted = non_empty("TETRIS_MUTED")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            data_dir,
            fps,
            seed,
            log_path,
            log_level,
            muted,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }

    /// Configured seed, or one derived from the clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
