//! Hand gesture mouse control from a webcam.
//!
//! Each frame flows through a fixed pipeline:
//! 1. A [`video::VideoSource`] yields a frame
//! 2. A [`hand_detection::LandmarkDetector`] finds 21 hand landmarks
//! 3. [`gesture::classify`] turns the landmarks into a [`gesture::Gesture`]
//! 4. An [`dispatcher::ActionDispatcher`] performs the matching mouse action
//! 5. An optional [`render::Renderer`] draws the overlay and polls the quit key
//!
//! Every collaborator sits behind a trait so the loop can run against fakes.
//!
//! # Examples
//!
//! ## Classifying landmarks
//!
//! ```
//! use hand_gesture_mouse::gesture::{classify_features, Gesture, GestureFeatures};
//!
//! let features = GestureFeatures {
//!     thumb_index_dist: 80.0,
//!     index_angle: 30.0,
//!     middle_angle: 120.0,
//! };
//! assert_eq!(classify_features(&features), Gesture::LeftClick);
//! ```
//!
//! ## Complete pipeline
//!
//! ```no_run
//! use hand_gesture_mouse::{
//!     app::{AppConfig, GestureApp},
//!     cursor_control::CursorController,
//!     dispatcher::{ActionDispatcher, ScreenshotSettings},
//!     hand_detection::HandLandmarkDetector,
//!     render::HighGuiRenderer,
//!     video::CameraSource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let video = CameraSource::open(0, true, 1)?;
//! let detector = HandLandmarkDetector::new("assets/hand_landmark.onnx", 0.7)?;
//! let dispatcher = ActionDispatcher::new(CursorController::new()?, ScreenshotSettings::default());
//! let renderer = HighGuiRenderer::new("Frame")?;
//!
//! let app = GestureApp::new(AppConfig::default(), video, detector, dispatcher, Some(renderer));
//! let summary = app.run()?;
//! println!("Processed {} frames", summary.frames);
//! # Ok(())
//! # }
//! ```

/// Fixed thresholds, indices and defaults
pub mod constants;

/// Landmark points, landmark sets and anatomical indices
pub mod landmarks;

/// Angle and distance helpers
pub mod geometry;

/// Gesture classification decision table
pub mod gesture;

/// Gesture to mouse action dispatch
pub mod dispatcher;

/// Cursor control module for X11 systems
pub mod cursor_control;

/// Hand landmark detection with ONNX Runtime
pub mod hand_detection;

/// Webcam and video file frame sources
pub mod video;

/// Camera window overlay
pub mod render;

/// Main application module
pub mod app;

/// Configuration management
pub mod config;

/// Coordinate conversion utilities
pub mod utils;

/// Error types and result handling
pub mod error;

pub use error::{Error, Result};
