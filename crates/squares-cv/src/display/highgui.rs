//! Interactive viewer backed by an OpenCV highgui window

use super::{FeatureViewer, Stage, Step};
use crate::Result;
use anyhow::Context;
use log::debug;
use opencv::{core::Mat, highgui};

/// Key code that ends the run.
pub const ESCAPE_KEY: i32 = 27;

pub struct HighGuiViewer {
    window_name: String,
    step_through: bool,
}

impl HighGuiViewer {
    /// Open the named window. With `step_through`, every checkpoint blocks.
    pub fn new(window_name: &str, step_through: bool) -> Result<Self> {
        highgui::named_window(window_name, highgui::WINDOW_AUTOSIZE)
            .with_context(|| format!("Failed to open window: {}", window_name))?;

        Ok(Self {
            window_name: window_name.to_string(),
            step_through,
        })
    }

    fn display_and_wait(&self, image: &Mat) -> Result<Step> {
        highgui::imshow(&self.window_name, image).context("Failed to display image")?;
        let key = highgui::wait_key(0).context("Failed to wait for a key press")?;
        Ok(step_for_key(key))
    }
}

impl FeatureViewer for HighGuiViewer {
    fn show(&mut self, stage: Stage, image: &Mat) -> Result<Step> {
        if !self.step_through {
            return Ok(Step::Continue);
        }
        debug!("Showing {}", stage);
        self.display_and_wait(image)
    }

    fn present(&mut self, image: &Mat) -> Result<Step> {
        self.display_and_wait(image)
    }
}

impl Drop for HighGuiViewer {
    fn drop(&mut self) {
        let _ = highgui::destroy_all_windows();
    }
}

/// Only the low byte of the key code is significant.
fn step_for_key(key: i32) -> Step {
    if key & 0xff == ESCAPE_KEY {
        Step::Quit
    } else {
        Step::Continue
    }
}
