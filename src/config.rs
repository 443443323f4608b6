//! Run configuration, read from environment variables.
//!
//! Missing or unparsable values fall back to defaults; configuration never
//! stops the game from starting.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

/// Settings for one run of the terminal game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// RNG seed for the session (`BLOCK_DROP_SEED`)
    pub seed: u32,
    /// Frame interval of the runner loop in ms (`BLOCK_DROP_FRAME_MS`)
    pub frame_ms: u32,
    /// Log file; logging is disabled when unset (`BLOCK_DROP_LOG_PATH`)
    pub log_path: Option<PathBuf>,
    /// `env_logger` filter expression (`BLOCK_DROP_LOG`)
    pub log_filter: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl RunConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup, e.g. a map in tests
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("BLOCK_DROP_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = non_empty("BLOCK_DROP_FRAME_MS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(FRAME_MS);

        let log_path = non_empty("BLOCK_DROP_LOG_PATH").map(PathBuf::from);

        let log_filter = non_empty("BLOCK_DROP_LOG").unwrap_or_else(|| "info".to_string());

        Self {
            seed,
            frame_ms,
            log_path,
            log_filter,
        }
    }
}

/// Seed derived from the wall clock, so unseeded runs differ.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}
