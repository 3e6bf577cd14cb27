//! Square classification heuristic
//!
//! An approximated contour counts as a square when it has four vertices, an
//! area inside the image's band, is convex, and every corner is close to a
//! right angle.

pub mod band;
pub mod config;

pub use band::AreaBand;
pub use config::{ClassifierConfig, ConfigError};

use crate::geometry::{ImageSize, Point, is_convex, max_corner_cosine, signed_area};

/// Corners with `|cos|` at or above this are too far from 90 degrees.
pub const MAX_CORNER_COSINE: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct SquareClassifier {
    config: ClassifierConfig,
}

impl SquareClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Decide whether `polygon`, traced from an image of `size`, is a square.
    pub fn classify(&self, polygon: &[Point], size: ImageSize) -> bool {
        if polygon.len() != 4 {
            return false;
        }

        let area = signed_area(polygon).abs();
        if !AreaBand::for_image(size, &self.config).contains(area) {
            return false;
        }

        if !is_convex(polygon) {
            return false;
        }

        max_corner_cosine(polygon) < MAX_CORNER_COSINE
    }
}
