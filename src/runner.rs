//! Sequential load → detect → draw → present loop over the image list

use anyhow::Context;
use log::{info, warn};
use serde::Serialize;
use squares_cv::{
    draw_squares, utils::export_json, DetectionResult, FeatureViewer, ImageUtils, Result,
    SquareDetector, Stage,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample images processed on every run, after the user image if one is given.
pub const SAMPLE_IMAGES: [&str; 8] = [
    "../data/IQTest_Colorchecker_HDR_D50_40.jpg",
    "../data/IQTest_Colorchecker_HDR_D50_40-rot.jpg",
    "../data/IQTest_Colorchecker_HDR_D50_40-affine.jpg",
    "../data/blob.png",
    "../data/IntelInddor25fps0307_Jeff2.avi-012.png",
    "../data/contour.png",
    "../data/HDRScene_30fps_3.avi-011.png",
    "../data/hdr.png",
];

pub fn resolve_image_list(user_image: Option<&Path>) -> Vec<PathBuf> {
    user_image
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SAMPLE_IMAGES.iter().map(PathBuf::from))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub path: PathBuf,
    pub result: DetectionResult,
}

#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub images: Vec<ImageReport>,
    pub skipped: Vec<PathBuf>,
    /// The user pressed escape before the list was exhausted.
    pub cancelled: bool,
}

pub struct Runner {
    detector: SquareDetector,
    output_dir: Option<PathBuf>,
}

impl Runner {
    pub fn new(detector: SquareDetector, output_dir: Option<PathBuf>) -> Self {
        Self {
            detector,
            output_dir,
        }
    }

    /// Process `paths` in order. Files that fail to decode are skipped.
    pub fn run(&self, paths: &[PathBuf], viewer: &mut dyn FeatureViewer) -> Result<RunSummary> {
        if let Some(dir) = &self.output_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
        }

        let mut summary = RunSummary::default();

        for path in paths {
            let mut image = match ImageUtils::load_color(path) {
                Ok(image) => image,
                Err(e) => {
                    warn!("Couldn't load {}: {}", path.display(), e);
                    summary.skipped.push(path.clone());
                    continue;
                }
            };

            let size = ImageUtils::size_of(&image);
            info!("Processing {} ({}x{})", path.display(), size.width, size.height);

            if viewer.show(Stage::Input, &image)?.is_quit() {
                summary.cancelled = true;
                break;
            }

            let Some(result) = self.detector.find_squares(&image, viewer)? else {
                summary.cancelled = true;
                break;
            };
            info!(
                "Found {} squares in {} ({} contours, {}ms)",
                result.squares.len(),
                path.display(),
                result.stats.contours_examined,
                result.stats.processing_time_ms
            );

            draw_squares(
                &mut image,
                &result.squares,
                &self.detector.config().visualization.overlay,
            )?;

            if let Some(dir) = &self.output_dir {
                let output_path = dir.join(annotated_name(path));
                ImageUtils::save_image(&image, &output_path)?;
                info!("Annotated image saved: {}", output_path.display());
            }

            summary.images.push(ImageReport {
                path: path.clone(),
                result,
            });

            if viewer.present(&image)?.is_quit() {
                summary.cancelled = true;
                break;
            }
        }

        Ok(summary)
    }
}

pub fn write_report(summary: &RunSummary, path: &Path) -> Result<()> {
    export_json(summary, path)?;
    info!("Report written to {}", path.display());
    Ok(())
}

fn annotated_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    format!("{}_squares.png", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::Mat;
    use squares_cv::{DetectionConfig, HeadlessViewer, Step};

    /// Answers `present` calls from a script; every other checkpoint continues.
    struct ScriptedViewer {
        presents: Vec<Step>,
        presented: usize,
        quit_on_input: bool,
    }

    impl ScriptedViewer {
        fn new(presents: Vec<Step>) -> Self {
            Self {
                presents,
                presented: 0,
                quit_on_input: false,
            }
        }
    }

    impl FeatureViewer for ScriptedViewer {
        fn show(&mut self, stage: Stage, _image: &Mat) -> Result<Step> {
            if self.quit_on_input && stage == Stage::Input {
                return Ok(Step::Quit);
            }
            Ok(Step::Continue)
        }

        fn present(&mut self, _image: &Mat) -> Result<Step> {
            let step = self.presents.get(self.presented).copied().unwrap_or(Step::Continue);
            self.presented += 1;
            Ok(step)
        }
    }

    /// Writes `count` small square scenes into a fresh directory.
    fn write_scenes(name: &str, count: usize) -> Vec<PathBuf> {
        let dir = std::env::temp_dir().join(format!("squares-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut scene = image::RgbImage::from_pixel(120, 120, image::Rgb([255, 255, 255]));
        for y in 45..75 {
            for x in 45..75 {
                scene.put_pixel(x, y, image::Rgb([0, 0, 0]));
            }
        }

        (0..count)
            .map(|i| {
                let path = dir.join(format!("scene{}.png", i));
                scene.save(&path).unwrap();
                path
            })
            .collect()
    }

    fn runner() -> Result<Runner> {
        Ok(Runner::new(SquareDetector::new(DetectionConfig::default())?, None))
    }

    #[test]
    fn test_continue_processes_every_image() -> Result<()> {
        let paths = write_scenes("continue", 3);
        let mut viewer = ScriptedViewer::new(vec![Step::Continue; 3]);

        let summary = runner()?.run(&paths, &mut viewer)?;

        assert_eq!(summary.images.len(), 3);
        assert_eq!(viewer.presented, 3);
        assert!(summary.skipped.is_empty());
        assert!(!summary.cancelled);
        Ok(())
    }

    #[test]
    fn test_quit_at_present_ends_the_run() -> Result<()> {
        let paths = write_scenes("present-quit", 3);
        let mut viewer = ScriptedViewer::new(vec![Step::Quit]);

        let summary = runner()?.run(&paths, &mut viewer)?;

        assert_eq!(summary.images.len(), 1);
        assert_eq!(summary.images[0].path, paths[0]);
        assert_eq!(viewer.presented, 1);
        assert!(summary.cancelled);
        Ok(())
    }

    #[test]
    fn test_quit_at_input_skips_detection() -> Result<()> {
        let paths = write_scenes("input-quit", 2);
        let mut viewer = ScriptedViewer::new(Vec::new());
        viewer.quit_on_input = true;

        let summary = runner()?.run(&paths, &mut viewer)?;

        assert!(summary.images.is_empty());
        assert_eq!(viewer.presented, 0);
        assert!(summary.cancelled);
        Ok(())
    }

    #[test]
    fn test_unreadable_file_does_not_stop_the_run() -> Result<()> {
        let mut paths = write_scenes("mixed", 1);
        paths.insert(0, PathBuf::from("no/such/file.png"));
        let mut viewer = ScriptedViewer::new(Vec::new());

        let summary = runner()?.run(&paths, &mut viewer)?;

        assert_eq!(summary.skipped, vec![PathBuf::from("no/such/file.png")]);
        assert_eq!(summary.images.len(), 1);
        assert!(!summary.cancelled);
        Ok(())
    }

    #[test]
    fn test_user_image_goes_first() {
        let paths = resolve_image_list(Some(Path::new("mine.jpg")));

        assert_eq!(paths.len(), SAMPLE_IMAGES.len() + 1);
        assert_eq!(paths[0], PathBuf::from("mine.jpg"));
        assert_eq!(paths[1], PathBuf::from(SAMPLE_IMAGES[0]));
    }

    #[test]
    fn test_sample_list_without_user_image() {
        let paths = resolve_image_list(None);
        assert_eq!(paths.len(), 8);
        assert_eq!(paths.last(), Some(&PathBuf::from("../data/hdr.png")));
    }

    #[test]
    fn test_annotated_name() {
        assert_eq!(annotated_name(Path::new("../data/blob.png")), "blob_squares.png");
        assert_eq!(annotated_name(Path::new("")), "image_squares.png");
    }

    #[test]
    fn test_undecodable_files_are_skipped() -> Result<()> {
        let runner = runner()?;
        let paths = vec![
            PathBuf::from("no/such/file.png"),
            PathBuf::from("no/such/other.jpg"),
        ];

        let summary = runner.run(&paths, &mut HeadlessViewer)?;

        assert!(summary.images.is_empty());
        assert_eq!(summary.skipped, paths);
        assert!(!summary.cancelled);
        Ok(())
    }
}
