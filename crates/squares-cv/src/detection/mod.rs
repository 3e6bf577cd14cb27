//! High-level detection module

pub mod config;
pub mod detector;

pub use config::{DetectionConfig, VisualizationConfig};
pub use detector::{DetectedSquare, DetectionResult, DetectionStats, SquareDetector};
