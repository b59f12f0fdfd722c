//! Runtime configuration for the terminal binary, read from the environment.

use std::time::Duration;

use crate::types::TICK_MS;

pub const ENV_SEED: &str = "TOWER_TETRIS_SEED";
pub const ENV_FRAME_MS: &str = "TOWER_TETRIS_FRAME_MS";
pub const ENV_LOG_PATH: &str = "TOWER_TETRIS_LOG_PATH";
pub const ENV_LOG: &str = "TOWER_TETRIS_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for the piece randomizer.
    pub seed: u32,
    /// Length of one simulation frame.
    pub frame_ms: u32,
    /// Log file; logging is off when `None`.
    pub log_path: Option<String>,
    /// `EnvFilter` directive for the log file.
    pub log_filter: String,
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), clock_seed())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall
    /// back to defaults; `fallback_seed` is used when no seed is given.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, fallback_seed: u32) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty(ENV_SEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or(fallback_seed);

        let frame_ms = non_empty(ENV_FRAME_MS)
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(TICK_MS)
            .max(1);

        Self {
            seed,
            frame_ms,
            log_path: non_empty(ENV_LOG_PATH),
            log_filter: non_empty(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms as u64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None, 1)
    }
}

/// Seed derived from the wall clock, for unseeded runs.
fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
