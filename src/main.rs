use clap::Parser;
use log::{info, warn};
use squares_cv::{FeatureViewer, HeadlessViewer, HighGuiViewer, SquareDetector};

mod cli;
mod runner;

use cli::Cli;
use runner::Runner;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.detection_config()?;
    info!("Using OpenCV version: {}", opencv::core::get_version_string()?);

    let mut viewer: Box<dyn FeatureViewer> = if cli.headless {
        if cli.vis {
            warn!("--vis has no effect with --headless");
        }
        Box::new(HeadlessViewer)
    } else {
        Box::new(HighGuiViewer::new(
            &config.visualization.window_name,
            config.visualization.step_through,
        )?)
    };

    let paths = runner::resolve_image_list(cli.image.as_deref());
    let runner = Runner::new(SquareDetector::new(config)?, cli.output.clone());
    let summary = runner.run(&paths, viewer.as_mut())?;

    if summary.cancelled {
        info!("Stopped by user");
    }
    info!(
        "Processed {} images, skipped {}",
        summary.images.len(),
        summary.skipped.len()
    );

    if let Some(path) = &cli.json {
        runner::write_report(&summary, path)?;
    }

    Ok(())
}
