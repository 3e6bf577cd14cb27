//! Detection configuration

use crate::Result;
use crate::draw::OverlayStyle;
use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};
use squares_core::ClassifierConfig;
use std::fs;
use std::path::Path;

/// Main detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub classifier: ClassifierConfig,
    /// Upper Canny threshold for the edge pass; the lower one is always 0.
    pub canny_threshold: f64,
    /// Number of passes per channel. Pass 0 is the Canny pass.
    pub levels: usize,
    /// Colour planes to sweep, clamped to what the image has.
    pub channels: usize,
    /// Simplification tolerance as a fraction of the contour perimeter.
    pub approx_accuracy: f64,
    pub visualization: VisualizationConfig,
}

/// Visualization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub window_name: String,
    /// Stop at every intermediate map and wait for a key.
    pub step_through: bool,
    pub overlay: OverlayStyle,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            canny_threshold: 50.0,
            levels: 11,
            channels: 3,
            approx_accuracy: 0.02,
            visualization: VisualizationConfig::default(),
        }
    }
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            window_name: "Square Detection Demo".to_string(),
            step_through: false,
            overlay: OverlayStyle::default(),
        }
    }
}

impl DetectionConfig {
    /// Load a (possibly partial) configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        ensure!(self.levels >= 1, "levels must be at least 1");
        ensure!(
            (1..=4).contains(&self.channels),
            "channels must be between 1 and 4, got {}",
            self.channels
        );
        ensure!(
            self.approx_accuracy.is_finite() && self.approx_accuracy > 0.0,
            "approx_accuracy must be positive, got {}",
            self.approx_accuracy
        );
        ensure!(
            self.canny_threshold.is_finite() && self.canny_threshold >= 0.0,
            "canny_threshold must be non-negative, got {}",
            self.canny_threshold
        );
        Ok(())
    }

    /// Mask threshold for pass `level` (> 0): pixels at or above it are set.
    pub fn threshold_for_level(&self, level: usize) -> usize {
        (level + 1) * 255 / self.levels
    }
}
