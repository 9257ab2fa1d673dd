//! Pipeline settings.
//!
//! `Settings` is owned by the caller and passed by value into each pipeline
//! invocation; the core never mutates it.

use crate::defaults;
use crate::error::{RepaceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning knobs for segmentation and resynthesis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Amplitude magnitude below which a sample counts as silence (0.001 to 0.1).
    pub silence_threshold: f32,
    /// Minimum silence duration in seconds before a pause is confirmed (0.2 to 2.0).
    pub min_silence_duration: f32,
    /// Scale factor applied to detected pauses in the output (0.5 to 3.0).
    pub pause_multiplier: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            silence_threshold: defaults::SILENCE_THRESHOLD,
            min_silence_duration: defaults::MIN_SILENCE_DURATION_SECS,
            pause_multiplier: defaults::PAUSE_MULTIPLIER,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// Missing fields use default values. Invalid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file, or return defaults if the file is missing.
    ///
    /// Invalid TOML or out-of-range values still fail.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let settings: Settings = toml::from_str(&contents)?;
                settings.validate()?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if !(defaults::SILENCE_THRESHOLD_MIN..=defaults::SILENCE_THRESHOLD_MAX)
            .contains(&self.silence_threshold)
        {
            return Err(RepaceError::InvalidSetting {
                key: "silence_threshold".to_string(),
                message: format!(
                    "must be between {} and {}, got {}",
                    defaults::SILENCE_THRESHOLD_MIN,
                    defaults::SILENCE_THRESHOLD_MAX,
                    self.silence_threshold
                ),
            });
        }

        if !(defaults::MIN_SILENCE_DURATION_MIN_SECS..=defaults::MIN_SILENCE_DURATION_MAX_SECS)
            .contains(&self.min_silence_duration)
        {
            return Err(RepaceError::InvalidSetting {
                key: "min_silence_duration".to_string(),
                message: format!(
                    "must be between {} and {} seconds, got {}",
                    defaults::MIN_SILENCE_DURATION_MIN_SECS,
                    defaults::MIN_SILENCE_DURATION_MAX_SECS,
                    self.min_silence_duration
                ),
            });
        }

        if !(defaults::PAUSE_MULTIPLIER_MIN..=defaults::PAUSE_MULTIPLIER_MAX)
            .contains(&self.pause_multiplier)
        {
            return Err(RepaceError::InvalidSetting {
                key: "pause_multiplier".to_string(),
                message: format!(
                    "must be between {} and {}, got {}",
                    defaults::PAUSE_MULTIPLIER_MIN,
                    defaults::PAUSE_MULTIPLIER_MAX,
                    self.pause_multiplier
                ),
            });
        }

        Ok(())
    }

    /// Minimum silence duration expressed in samples at the given rate.
    ///
    /// Never returns zero; a confirmed pause always needs at least one
    /// quiet sample.
    pub fn min_silence_samples(&self, sample_rate: u32) -> usize {
        let samples = (sample_rate as f64 * self.min_silence_duration as f64).round() as usize;
        samples.max(1)
    }
}
