use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{MotionTraceError, Result};

fn default_logging_interval() -> f32 {
    0.1
}

fn default_volume_multiplier() -> f32 {
    1.0
}

fn default_max_velocity_for_volume() -> f32 {
    3.0
}

fn default_output_path() -> PathBuf {
    PathBuf::from("movement_log.csv")
}

/// Configuration surface of a logging session.
///
/// All fields carry serde defaults so a partial JSON document is enough
/// to override a single knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds between durable log entries. Audio feedback is not
    /// affected by this value.
    #[serde(default = "default_logging_interval")]
    pub logging_interval: f32,
    /// Gain applied on top of the speed-derived volume. Accepted range
    /// is `[0, 2]`.
    #[serde(default = "default_volume_multiplier")]
    pub volume_multiplier: f32,
    /// Speed (m/s) at which the feedback volume saturates. Accepted
    /// range is `(0, 5]`.
    #[serde(default = "default_max_velocity_for_volume")]
    pub max_velocity_for_volume: f32,
    /// Destination of the flushed CSV log.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logging_interval: default_logging_interval(),
            volume_multiplier: default_volume_multiplier(),
            max_velocity_for_volume: default_max_velocity_for_volume(),
            output_path: default_output_path(),
        }
    }
}

impl SessionConfig {
    /// Loads a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file on disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Checks every knob against its accepted domain.
    pub fn validate(&self) -> Result<()> {
        if !self.logging_interval.is_finite() || self.logging_interval <= 0.0 {
            return Err(MotionTraceError::InvalidInput(
                "logging_interval must be a positive number of seconds",
            ));
        }
        if !(0.0..=2.0).contains(&self.volume_multiplier) {
            return Err(MotionTraceError::InvalidInput(
                "volume_multiplier must lie in [0, 2]",
            ));
        }
        if !self.max_velocity_for_volume.is_finite()
            || self.max_velocity_for_volume <= 0.0
            || self.max_velocity_for_volume > 5.0
        {
            return Err(MotionTraceError::InvalidInput(
                "max_velocity_for_volume must lie in (0, 5]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging_interval, 0.1);
        assert_eq!(config.volume_multiplier, 1.0);
        assert_eq!(config.max_velocity_for_volume, 3.0);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = SessionConfig::from_json(r#"{"logging_interval": 0.25}"#).unwrap();
        assert_eq!(config.logging_interval, 0.25);
        assert_eq!(config.volume_multiplier, 1.0);
        assert_eq!(config.output_path, PathBuf::from("movement_log.csv"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = SessionConfig {
            volume_multiplier: 2.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.volume_multiplier = 1.0;
        config.max_velocity_for_volume = 0.0;
        assert!(config.validate().is_err());

        config.max_velocity_for_volume = 5.5;
        assert!(config.validate().is_err());

        config.max_velocity_for_volume = 3.0;
        config.logging_interval = -0.1;
        assert!(config.validate().is_err());
    }
}
