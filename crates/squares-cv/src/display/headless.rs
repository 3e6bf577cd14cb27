use super::{FeatureViewer, Stage, Step};
use crate::Result;
use opencv::core::Mat;

/// Viewer for batch runs: never opens a window and never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessViewer;

impl FeatureViewer for HeadlessViewer {
    fn show(&mut self, _stage: Stage, _image: &Mat) -> Result<Step> {
        Ok(Step::Continue)
    }

    fn present(&mut self, _image: &Mat) -> Result<Step> {
        Ok(Step::Continue)
    }
}
