//! Hand gesture capture: draw or span a region with your fingers, hold still, click Save.

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture_capture::{
    app::HandCaptureApp,
    config::{Config, EXAMPLE_CONFIG},
    landmarks::SubprocessLandmarkSource,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, conflicts_with = "url")]
    cam: Option<i32>,

    /// Stream URL or video file to read instead of a camera
    #[arg(short, long)]
    url: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Directory captures are saved to
    #[arg(long)]
    capture_dir: Option<PathBuf>,

    /// Stationary frames needed to complete a capture
    #[arg(long)]
    dwell_frames: Option<u32>,

    /// Directory with gesture reference images (<label>.png)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// Command line values win over the configuration file
    fn apply(&self, config: &mut Config) {
        if let Some(cam) = self.cam {
            config.camera.device = cam;
            config.camera.url = None;
        }
        if let Some(url) = &self.url {
            config.camera.url = Some(url.clone());
        }
        if let Some(dir) = &self.capture_dir {
            config.capture.directory = dir.clone();
        }
        if let Some(frames) = self.dwell_frames {
            config.dwell.dwell_frames = frames;
        }
        if let Some(assets) = &self.assets {
            config.gestures.asset_dir = assets.clone();
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Gesture Capture");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    } else {
        Config::default()
    };
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let landmarks = SubprocessLandmarkSource::spawn(
        &config.landmarks.program,
        &config.landmarks.args,
        config.landmarks.confidence_threshold,
        config.capture.initial_mode.max_hands(),
    )
    .context("Failed to start the landmark helper")?;

    // Create and run application
    let mut app = HandCaptureApp::new(config, Box::new(landmarks))?;
    app.run()?;

    Ok(())
}
