//! Logger setup for the terminal binary.
//!
//! The game owns the terminal, so log records go to a file or nowhere.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};

use crate::config::RunConfig;

/// Install the global logger if a log file is configured.
///
/// Returns whether a logger was installed.
pub fn init(config: &RunConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::new()
        .parse_filters(&config.log_filter)
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;

    Ok(true)
}
