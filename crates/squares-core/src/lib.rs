//! Geometry and square classification shared by the detector and the CLI.
//!
//! Nothing in here touches OpenCV: contours arrive as plain point lists and
//! leave as a yes/no verdict.

pub mod classifier;
pub mod geometry;

pub use classifier::{AreaBand, ClassifierConfig, ConfigError, SquareClassifier};
pub use geometry::{GeometryError, ImageSize, Point, Polygon};
