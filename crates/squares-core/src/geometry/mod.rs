pub mod point;
pub mod polygon;

pub use point::{Offset, Point};
pub use polygon::{corner_cosine, is_convex, max_corner_cosine, signed_area, Polygon};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pixel dimensions of the image a polygon was traced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}
