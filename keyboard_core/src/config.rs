//! Tunable thresholds and timings.
//!
//! The defaults are tuned for a 1280×720 frame with a hand at arm's length.
//! A JSON file may override any subset of fields:
//!
//! ```json
//! { "pinch_threshold": 40.0, "debounce_secs": 0.3 }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::DEFAULT_MAX_LINE_LEN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Index–middle fingertip distance (frame pixels) below which a pinch
    /// counts as a click.  Strict `<`.
    pub pinch_threshold:   f32,
    /// Minimum time between two accepted presses of the same key.
    pub debounce_secs:     f64,
    /// How long a pressed key stays highlighted.
    pub flash_secs:        f64,
    /// Cursor blink half-period.
    pub cursor_blink_secs: f64,
    /// Characters per line before wrapping.
    pub max_line_len:      usize,
    /// Lines shown in the text panel.
    pub visible_lines:     usize,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        KeyboardConfig {
            pinch_threshold:   30.0,
            debounce_secs:     0.4,
            flash_secs:        0.2,
            cursor_blink_secs: 0.5,
            max_line_len:      DEFAULT_MAX_LINE_LEN,
            visible_lines:     5,
        }
    }
}

impl KeyboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: KeyboardConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pinch_threshold.is_finite() && self.pinch_threshold > 0.0) {
            return Err(invalid("pinch_threshold", self.pinch_threshold));
        }
        for (field, secs) in [
            ("debounce_secs",     self.debounce_secs),
            ("flash_secs",        self.flash_secs),
            ("cursor_blink_secs", self.cursor_blink_secs),
        ] {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(invalid(field, secs));
            }
        }
        if secs(self.cursor_blink_secs).is_zero() {
            return Err(invalid("cursor_blink_secs", self.cursor_blink_secs));
        }
        if self.max_line_len == 0 {
            return Err(invalid("max_line_len", self.max_line_len));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration { secs(self.debounce_secs) }

    pub fn flash(&self) -> Duration { secs(self.flash_secs) }

    pub fn cursor_blink(&self) -> Duration { secs(self.cursor_blink_secs) }
}

/// Only reached with values `validate` has accepted.
fn secs(s: f64) -> Duration {
    Duration::try_from_secs_f64(s).unwrap_or(Duration::ZERO)
}

fn invalid(field: &'static str, value: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid { field, reason: format!("{} is out of range", value) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
