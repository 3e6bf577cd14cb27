//! Display callbacks invoked at pipeline checkpoints

pub mod headless;
pub mod highgui;

pub use self::headless::HeadlessViewer;
pub use self::highgui::HighGuiViewer;

use crate::Result;
use opencv::core::Mat;
use std::fmt;

/// Pipeline checkpoint at which an intermediate map is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The freshly decoded image.
    Input,
    /// After the pyramid down/up round trip.
    Pyramid,
    /// One colour plane of the smoothed image.
    Channel(usize),
    /// Dilated Canny edges of a plane.
    Edges(usize),
    /// Binary threshold of a plane at a sweep level.
    Threshold { channel: usize, level: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Input => write!(f, "input"),
            Stage::Pyramid => write!(f, "pyramid"),
            Stage::Channel(c) => write!(f, "channel {}", c),
            Stage::Edges(c) => write!(f, "edges (channel {})", c),
            Stage::Threshold { channel, level } => {
                write!(f, "threshold level {} (channel {})", level, channel)
            }
        }
    }
}

/// What the viewer wants the pipeline to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The user asked to stop the whole run.
    Quit,
}

impl Step {
    pub fn is_quit(self) -> bool {
        self == Step::Quit
    }
}

pub trait FeatureViewer {
    /// Offer an intermediate map for inspection.
    fn show(&mut self, stage: Stage, image: &Mat) -> Result<Step>;

    /// Show the final overlay for one input image.
    fn present(&mut self, image: &Mat) -> Result<Step>;
}
