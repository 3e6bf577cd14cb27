//! Square detection on top of OpenCV
//!
//! Smooths the input with a pyramid round trip, sweeps every colour plane
//! through a Canny pass and a ladder of binary thresholds, and hands every
//! simplified contour to [`squares_core::SquareClassifier`].

pub mod detection;
pub mod display;
pub mod draw;
pub mod utils;

// Re-export commonly used types
pub use detection::{DetectedSquare, DetectionConfig, DetectionResult, SquareDetector};
pub use display::{FeatureViewer, HeadlessViewer, HighGuiViewer, Stage, Step};
pub use draw::{OverlayStyle, draw_squares};
pub use utils::{ImageUtils, LoadError};

// Error handling
pub type Result<T> = anyhow::Result<T>;
