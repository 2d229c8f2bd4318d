//! Timing settings.
//!
//! Defaults come from the shared constants. A JSON file may override any subset:
//!
//! ```json
//! { "fall_period_ms": 400, "lock_delay_ms": 250 }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    FALL_PERIOD_MS, FRAME_MS, LEVEL_STEP_MS, LOCK_DELAY_MS, MIN_PERIOD_MS,
    PIECE_FETCH_TIMEOUT_MS, STATE_DEBOUNCE_MS,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub frame_ms: u32,
    pub fall_period_ms: u32,
    pub lock_delay_ms: u32,
    pub level_step_ms: u32,
    pub min_period_ms: u32,
    pub state_debounce_ms: u32,
    pub piece_fetch_timeout_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            fall_period_ms: FALL_PERIOD_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            level_step_ms: LEVEL_STEP_MS,
            min_period_ms: MIN_PERIOD_MS,
            state_debounce_ms: STATE_DEBOUNCE_MS,
            piece_fetch_timeout_ms: PIECE_FETCH_TIMEOUT_MS,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Fall period at `level`: base minus one step per level, clamped.
    pub fn fall_period(&self, level: u32) -> u32 {
        self.scaled(self.fall_period_ms, level)
    }

    /// Lock-delay period at `level`, same scaling as the fall period.
    pub fn lock_period(&self, level: u32) -> u32 {
        self.scaled(self.lock_delay_ms, level)
    }

    fn scaled(&self, base: u32, level: u32) -> u32 {
        base.saturating_sub(level.saturating_mul(self.level_step_ms))
            .max(self.min_period_ms)
            .max(1)
    }
}
