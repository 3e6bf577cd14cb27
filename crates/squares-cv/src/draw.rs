//! Overlay rendering for detected squares

use crate::Result;
use crate::detection::DetectedSquare;
use anyhow::Context;
use opencv::{
    core::{self, Mat, Scalar, Vector},
    imgproc,
};
use serde::{Deserialize, Serialize};

/// Outline colour (RGB) and stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub color: (u8, u8, u8),
    pub thickness: i32,
}

impl OverlayStyle {
    /// OpenCV colour scalar (BGR order)
    pub fn bgr_scalar(&self) -> Scalar {
        Scalar::new(
            self.color.2 as f64,
            self.color.1 as f64,
            self.color.0 as f64,
            255.0,
        )
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: (0, 255, 0),
            thickness: 1,
        }
    }
}

/// Outline every square as a closed anti-aliased polyline.
pub fn draw_squares(image: &mut Mat, squares: &[DetectedSquare], style: &OverlayStyle) -> Result<()> {
    if squares.is_empty() {
        return Ok(());
    }

    let outlines: Vector<Vector<core::Point>> = squares
        .iter()
        .map(|square| {
            square
                .polygon
                .points()
                .iter()
                .map(|p| core::Point::new(p.x, p.y))
                .collect::<Vector<core::Point>>()
        })
        .collect();

    imgproc::polylines(
        image,
        &outlines,
        true,
        style.bgr_scalar(),
        style.thickness,
        imgproc::LINE_AA,
        0,
    )
    .context("Failed to draw square outlines")?;

    Ok(())
}
