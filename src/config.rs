//! Configuration management for the hand gesture mouse application
//!
//! Gesture thresholds are fixed in [`crate::constants`] and deliberately absent
//! from the file format.

use crate::{
    app::DispatchFailurePolicy,
    constants::{DEFAULT_PRESENCE_THRESHOLD, DEFAULT_WINDOW_NAME},
    dispatcher::ScreenshotSettings,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Video capture configuration
    pub camera: CameraConfig,

    /// Hand landmark model configuration
    pub detector: DetectorConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// Gesture action configuration
    pub actions: ActionConfig,
}

/// Video capture parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Webcam device index
    pub index: i32,

    /// Replay a recorded video instead of the webcam
    pub video_file: Option<String>,

    /// Mirror frames horizontally
    pub mirror: bool,

    /// Capture buffer size in frames (0 keeps the backend default)
    pub buffer_size: u32,
}

/// Hand landmark detector parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Minimum hand presence score (0.0-1.0)
    pub presence_threshold: f32,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the camera window
    pub gui: bool,

    /// Camera window title
    pub window_name: String,
}

/// Gesture action configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Screenshot output
    pub screenshots: ScreenshotSettings,

    /// What to do when an OS action fails
    pub dispatch_failure: DispatchFailurePolicy,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            video_file: None,
            mirror: true,
            buffer_size: 1,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/hand_landmark.onnx"),
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui: true,
            window_name: DEFAULT_WINDOW_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate value ranges, independent of the filesystem
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.camera.video_file.is_none() && self.camera.index < 0 {
            return Err(Error::ConfigError(format!(
                "Camera index must be non-negative, got {}",
                self.camera.index
            )));
        }
        if !(0.0..=1.0).contains(&self.detector.presence_threshold) {
            return Err(Error::ConfigError(
                "Presence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        // Only the window can request quit, so headless runs need a finite source
        if !self.display.gui && self.camera.video_file.is_none() {
            return Err(Error::ConfigError(
                "Running without the window requires a video file".to_string(),
            ));
        }
        if self.display.gui && self.display.window_name.trim().is_empty() {
            return Err(Error::ConfigError("Window name must not be empty".to_string()));
        }

        Ok(())
    }

    /// Check that referenced files and directories exist
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing path
    pub fn validate_paths(&self) -> Result<()> {
        if !self.detector.model.exists() {
            return Err(Error::ConfigError(format!(
                "Hand landmark model not found: {}",
                self.detector.model.display()
            )));
        }
        if !self.actions.screenshots.directory.is_dir() {
            return Err(Error::ConfigError(format!(
                "Screenshot directory not found: {}",
                self.actions.screenshots.directory.display()
            )));
        }
        if let Some(video) = &self.camera.video_file {
            if !Path::new(video).exists() {
                return Err(Error::ConfigError(format!("Video file not found: {video}")));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Mouse Configuration

# Video capture
camera:
  index: 0
  mirror: true
  buffer_size: 1

# Hand landmark model
detector:
  model: "assets/hand_landmark.onnx"
  presence_threshold: 0.7

# Display settings
display:
  gui: true
  window_name: "Frame"

# Gesture actions
actions:
  screenshots:
    directory: "."
    naming: "random"
  dispatch_failure: "abort"
"#;
