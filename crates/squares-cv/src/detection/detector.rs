//! Channel × threshold-level sweep feeding the square classifier

use super::config::DetectionConfig;
use crate::Result;
use crate::display::{FeatureViewer, Stage};
use crate::utils::ImageUtils;
use anyhow::{Context, bail};
use log::debug;
use opencv::{
    core::{self, Mat, Size, Vector},
    imgproc,
    prelude::*,
};
use serde::Serialize;
use squares_core::{ImageSize, Point, Polygon, SquareClassifier};
use std::time::Instant;

/// One accepted quadrilateral and the pass that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedSquare {
    pub polygon: Polygon,
    pub channel: usize,
    /// Sweep level; 0 is the Canny pass.
    pub level: usize,
    pub area: f64,
    pub max_cosine: f64,
}

impl DetectedSquare {
    pub fn new(polygon: Polygon, channel: usize, level: usize) -> Self {
        let area = polygon.area();
        let max_cosine = polygon.max_corner_cosine();
        Self {
            polygon,
            channel,
            level,
            area,
            max_cosine,
        }
    }
}

/// Every square found in one image. The same physical square usually shows
/// up once per channel and level that isolates it; nothing is merged.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub image_size: ImageSize,
    pub squares: Vec<DetectedSquare>,
    pub stats: DetectionStats,
}

/// Detection statistics
#[derive(Debug, Clone, Serialize)]
pub struct DetectionStats {
    pub masks_evaluated: usize,
    pub contours_examined: usize,
    pub squares_found: usize,
    pub processing_time_ms: u64,
}

pub struct SquareDetector {
    config: DetectionConfig,
    classifier: SquareClassifier,
}

impl SquareDetector {
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        let classifier = SquareClassifier::new(config.classifier);
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect from image::RgbImage
    pub fn detect_from_rgb_image(
        &self,
        rgb_image: &image::RgbImage,
        viewer: &mut dyn FeatureViewer,
    ) -> Result<Option<DetectionResult>> {
        let bgr = ImageUtils::rgb_to_mat(rgb_image)?;
        self.find_squares(&bgr, viewer)
    }

    /// Run the full sweep over `image`.
    ///
    /// Returns `Ok(None)` when the viewer asks to quit at any checkpoint.
    pub fn find_squares(
        &self,
        image: &Mat,
        viewer: &mut dyn FeatureViewer,
    ) -> Result<Option<DetectionResult>> {
        if image.empty() {
            bail!("Cannot detect squares in an empty image");
        }

        let start_time = Instant::now();
        let size = ImageUtils::size_of(image);

        let smoothed = self.smooth(image)?;
        if viewer.show(Stage::Pyramid, &smoothed)?.is_quit() {
            return Ok(None);
        }

        let channels = self.config.channels.min(smoothed.channels().max(1) as usize);
        let mut squares = Vec::new();
        let mut masks_evaluated = 0;
        let mut contours_examined = 0;

        for channel in 0..channels {
            let mut plane = Mat::default();
            core::extract_channel(&smoothed, &mut plane, channel as i32)
                .with_context(|| format!("Failed to extract channel {}", channel))?;
            if viewer.show(Stage::Channel(channel), &plane)?.is_quit() {
                return Ok(None);
            }

            for level in 0..self.config.levels {
                let (mask, stage) = if level == 0 {
                    // Canny catches squares with gradient shading that no
                    // single threshold separates
                    (self.edge_mask(&plane)?, Stage::Edges(channel))
                } else {
                    (
                        self.threshold_mask(&plane, level)?,
                        Stage::Threshold { channel, level },
                    )
                };
                if viewer.show(stage, &mask)?.is_quit() {
                    return Ok(None);
                }

                let before = squares.len();
                contours_examined += self.collect_squares(&mask, size, channel, level, &mut squares)?;
                masks_evaluated += 1;
                debug!(
                    "channel {} level {}: {} squares",
                    channel,
                    level,
                    squares.len() - before
                );
            }
        }

        let stats = DetectionStats {
            masks_evaluated,
            contours_examined,
            squares_found: squares.len(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(Some(DetectionResult {
            image_size: size,
            squares,
            stats,
        }))
    }

    /// Pyramid down then up to the original size, filtering out noise.
    fn smooth(&self, image: &Mat) -> Result<Mat> {
        let mut pyr = Mat::default();
        imgproc::pyr_down(
            image,
            &mut pyr,
            Size::new(image.cols() / 2, image.rows() / 2),
            core::BORDER_DEFAULT,
        )
        .context("pyrDown failed")?;

        let mut smoothed = Mat::default();
        imgproc::pyr_up(&pyr, &mut smoothed, image.size()?, core::BORDER_DEFAULT)
            .context("pyrUp failed")?;

        Ok(smoothed)
    }

    /// Canny with the lower threshold at 0 to force edge merging, dilated
    /// once to close gaps between segments.
    fn edge_mask(&self, plane: &Mat) -> Result<Mat> {
        let mut edges = Mat::default();
        imgproc::canny(plane, &mut edges, 0.0, self.config.canny_threshold, 3, false)
            .context("Canny failed")?;

        let mut dilated = Mat::default();
        imgproc::dilate(
            &edges,
            &mut dilated,
            &Mat::default(),
            core::Point::new(-1, -1),
            1,
            core::BORDER_CONSTANT,
            imgproc::morphology_default_border_value()?,
        )
        .context("Dilation failed")?;

        Ok(dilated)
    }

    /// `255` where `plane >= threshold_for_level(level)`, else `0`.
    fn threshold_mask(&self, plane: &Mat, level: usize) -> Result<Mat> {
        // THRESH_BINARY keeps values strictly above the threshold
        let threshold = self.config.threshold_for_level(level) as f64 - 1.0;
        let mut mask = Mat::default();
        imgproc::threshold(plane, &mut mask, threshold, 255.0, imgproc::THRESH_BINARY)
            .context("Threshold failed")?;
        Ok(mask)
    }

    /// Trace, simplify and classify every contour of `mask`. Returns the
    /// number of contours examined.
    fn collect_squares(
        &self,
        mask: &Mat,
        size: ImageSize,
        channel: usize,
        level: usize,
        squares: &mut Vec<DetectedSquare>,
    ) -> Result<usize> {
        let mut contours = Vector::<Vector<core::Point>>::new();
        imgproc::find_contours(
            mask,
            &mut contours,
            imgproc::RETR_LIST,
            imgproc::CHAIN_APPROX_SIMPLE,
            core::Point::new(0, 0),
        )
        .context("findContours failed")?;

        for contour in contours.iter() {
            let tolerance = imgproc::arc_length(&contour, true)? * self.config.approx_accuracy;
            let mut approx = Vector::<core::Point>::new();
            imgproc::approx_poly_dp(&contour, &mut approx, tolerance, true)?;

            let points: Vec<Point> = approx.iter().map(|p| Point::new(p.x, p.y)).collect();
            if self.classifier.classify(&points, size) {
                squares.push(DetectedSquare::new(Polygon::new(points)?, channel, level));
            }
        }

        Ok(contours.len())
    }
}
