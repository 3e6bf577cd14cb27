//! Command-line surface

use anyhow::Context;
use clap::Parser;
use squares_core::ClassifierConfig;
use squares_cv::{DetectionConfig, Result};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "squares")]
#[command(version)]
#[command(
    about = "Find squares in a list of preset images and an optional user image",
    long_about = "A program using pyramid scaling, Canny, contours and contour simplification \
                  to find squares in a list of preset images and the user provided image. \
                  Press Esc in the window to stop, any other key to advance."
)]
pub struct Cli {
    /// Image to process before the built-in samples.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Smallest accepted area is img_area/24/minratio [default: 4.0].
    #[arg(long = "minratio")]
    pub min_ratio: Option<f64>,

    /// Largest accepted area is img_area/24*maxratio [default: 4.0].
    #[arg(long = "maxratio")]
    pub max_ratio: Option<f64>,

    /// Step through every intermediate feature map.
    #[arg(long)]
    pub vis: bool,

    /// JSON detection config; --minratio/--maxratio override its ratios.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Never open a window or wait for keys.
    #[arg(long)]
    pub headless: bool,

    /// Directory for annotated copies of each image.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write every detection to this JSON file.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl Cli {
    /// Merge the config file (if any) with the flags given on the command line.
    pub fn detection_config(&self) -> Result<DetectionConfig> {
        let mut config = match &self.config {
            Some(path) => DetectionConfig::from_json_file(path)?,
            None => DetectionConfig::default(),
        };

        let min_ratio = self.min_ratio.unwrap_or(config.classifier.min_ratio);
        let max_ratio = self.max_ratio.unwrap_or(config.classifier.max_ratio);
        config.classifier =
            ClassifierConfig::new(min_ratio, max_ratio).context("Invalid area ratio")?;

        if self.vis {
            config.visualization.step_through = true;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_use_equals_syntax() {
        let cli = Cli::parse_from([
            "squares",
            "--image=board.png",
            "--minratio=2.5",
            "--maxratio=6",
            "--vis",
        ]);

        assert_eq!(cli.image, Some(PathBuf::from("board.png")));
        let config = cli.detection_config().unwrap();
        assert_eq!(config.classifier.min_ratio, 2.5);
        assert_eq!(config.classifier.max_ratio, 6.0);
        assert!(config.visualization.step_through);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["squares"]);
        let config = cli.detection_config().unwrap();

        assert!(cli.image.is_none());
        assert_eq!(config, DetectionConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_ratio() {
        let cli = Cli::parse_from(["squares", "--minratio=0"]);
        assert!(cli.detection_config().is_err());
    }

    #[test]
    fn test_help_is_reported_as_early_exit() {
        let err = Cli::try_parse_from(["squares", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
