//! Constants used throughout the application

/// Number of landmarks produced for one hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Values per landmark in the detector output tensor (x, y, z)
pub const LANDMARK_OUTPUT_STRIDE: usize = 3;

/// Curl angle below which a finger counts as bent (degrees)
pub const BENT_ANGLE_MAX: f64 = 50.0;

/// Curl angle above which a finger counts as straight (degrees)
pub const STRAIGHT_ANGLE_MIN: f64 = 90.0;

/// Thumb-index distance separating a pinch from a spread hand (rescaled units)
pub const PINCH_DISTANCE: f64 = 50.0;

/// Distances in normalized frame units are rescaled onto `[0, DISTANCE_SCALE]`
pub const DISTANCE_SCALE: f64 = 1000.0;

/// Screenshot file name prefix and extension
pub const SCREENSHOT_PREFIX: &str = "my_screenshot_";
pub const SCREENSHOT_EXTENSION: &str = "png";

/// Bounds of the random screenshot suffix (inclusive)
pub const SCREENSHOT_RANDOM_MIN: u32 = 1;
pub const SCREENSHOT_RANDOM_MAX: u32 = 1000;

/// Gesture label placement on the camera window
pub const LABEL_ORIGIN: (i32, i32) = (50, 50);
pub const LABEL_FONT_SCALE: f64 = 1.0;
pub const LABEL_THICKNESS: i32 = 2;

/// Default hand landmark model input size
pub const DEFAULT_DETECTOR_INPUT_SIZE: i32 = 224;

/// Default minimum hand presence score
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.7;

/// Window title of the camera view
pub const DEFAULT_WINDOW_NAME: &str = "Frame";

/// Keys that end the frame loop
pub const QUIT_KEY: i32 = b'q' as i32;
pub const ESCAPE_KEY: i32 = 27;
