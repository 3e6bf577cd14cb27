//! Image loading, saving and conversion helpers

use crate::Result;
use anyhow::Context;
use opencv::{
    core::{self, CV_8UC3, Mat, Scalar, Vec3b, Vector},
    imgcodecs::{self, IMREAD_COLOR},
    prelude::*,
};
use squares_core::ImageSize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an input image could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not decode {0:?}")]
    Empty(PathBuf),
    #[error("OpenCV failed while reading {path:?}")]
    OpenCv {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
}

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Decode an image as 8-bit BGR.
    pub fn load_color<P: AsRef<Path>>(path: P) -> std::result::Result<Mat, LoadError> {
        let path = path.as_ref();
        let image = imgcodecs::imread(&path.to_string_lossy(), IMREAD_COLOR).map_err(|source| {
            LoadError::OpenCv {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if image.empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }
        Ok(image)
    }

    /// Save Mat as image; the format follows the file extension.
    pub fn save_image<P: AsRef<Path>>(mat: &Mat, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy();

        imgcodecs::imwrite(&path_str, mat, &Vector::new())
            .with_context(|| format!("Failed to save image: {}", path_str))?;

        Ok(())
    }

    /// Convert image::RgbImage to a BGR OpenCV Mat
    pub fn rgb_to_mat(rgb_image: &image::RgbImage) -> Result<Mat> {
        let (width, height) = rgb_image.dimensions();
        let mut mat = Mat::new_rows_cols_with_default(
            height as i32,
            width as i32,
            CV_8UC3,
            Scalar::all(0.0),
        )
        .context("Failed to allocate BGR Mat")?;

        for (x, y, pixel) in rgb_image.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            *mat.at_2d_mut::<Vec3b>(y as i32, x as i32)? = core::VecN([b, g, r]);
        }

        Ok(mat)
    }

    pub fn size_of(mat: &Mat) -> ImageSize {
        ImageSize::new(mat.cols().max(0) as u32, mat.rows().max(0) as u32)
    }
}
