use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIN_RATIO: f64 = 4.0;
pub const DEFAULT_MAX_RATIO: f64 = 4.0;

/// Bounds of the accepted area band, relative to `width * height / 24`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Smallest accepted area is `reference / min_ratio`.
    pub min_ratio: f64,
    /// Largest accepted area is `reference * max_ratio`.
    pub max_ratio: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },
}

impl ClassifierConfig {
    pub fn new(min_ratio: f64, max_ratio: f64) -> Result<Self, ConfigError> {
        let config = Self { min_ratio, max_ratio };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that may have come from a hand-edited config file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("min_ratio", self.min_ratio)?;
        check_ratio("max_ratio", self.max_ratio)
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRatio { name, value })
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            max_ratio: DEFAULT_MAX_RATIO,
        }
    }
}
