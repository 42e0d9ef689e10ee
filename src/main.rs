//! Hand gesture mouse: move, click and take screenshots with hand gestures.

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture_mouse::{
    app::{AppConfig, DispatchFailurePolicy, GestureApp},
    config::{Config, EXAMPLE_CONFIG},
    cursor_control::CursorController,
    dispatcher::{ActionDispatcher, ScreenshotNaming},
    hand_detection::HandLandmarkDetector,
    render::HighGuiRenderer,
    video::CameraSource,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long)]
    cam: Option<i32>,

    /// Video file to process instead of the camera
    #[arg(short, long)]
    video: Option<String>,

    /// Hand landmark ONNX model
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Run without the camera window (requires --video, stops when it ends)
    #[arg(long)]
    no_gui: bool,

    /// Do not mirror the camera image
    #[arg(long)]
    no_mirror: bool,

    /// Directory screenshots are written to
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Screenshot file naming (random, timestamp)
    #[arg(long)]
    screenshot_naming: Option<String>,

    /// Log failed mouse actions and keep running instead of exiting
    #[arg(long)]
    continue_on_dispatch_error: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Command line values take precedence over the configuration file
    fn apply_to(self, config: &mut Config) -> Result<()> {
        if let Some(cam) = self.cam {
            config.camera.index = cam;
        }
        if let Some(video) = self.video {
            config.camera.video_file = Some(video);
        }
        if let Some(model) = self.model {
            config.detector.model = model;
        }
        if self.no_gui {
            config.display.gui = false;
        }
        if self.no_mirror {
            config.camera.mirror = false;
        }
        if let Some(dir) = self.screenshot_dir {
            config.actions.screenshots.directory = dir;
        }
        if let Some(naming) = self.screenshot_naming {
            config.actions.screenshots.naming = naming.parse::<ScreenshotNaming>()?;
        }
        if self.continue_on_dispatch_error {
            config.actions.dispatch_failure = DispatchFailurePolicy::LogAndContinue;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Gesture Mouse");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        Config::from_file(config_path).with_context(|| format!("Failed to load config file {config_path}"))?
    } else {
        Config::default()
    };

    args.apply_to(&mut config)?;
    config.validate()?;
    config.validate_paths()?;

    let video = match &config.camera.video_file {
        Some(path) => CameraSource::from_file(path, config.camera.mirror)?,
        None => CameraSource::open(config.camera.index, config.camera.mirror, config.camera.buffer_size)?,
    };

    let detector = HandLandmarkDetector::new(&config.detector.model, config.detector.presence_threshold)?;

    let controller = CursorController::new().context("Mouse control requires an X11 display with XTEST")?;
    let dispatcher = ActionDispatcher::new(controller, config.actions.screenshots.clone());

    let renderer = if config.display.gui {
        Some(HighGuiRenderer::new(&config.display.window_name)?)
    } else {
        info!("Running headless");
        None
    };

    let app = GestureApp::new(AppConfig::from(&config), video, detector, dispatcher, renderer);
    let summary = app.run()?;

    info!("Done after {} frames", summary.frames);
    Ok(())
}
