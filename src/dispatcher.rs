//! Turns a recognised gesture into exactly one OS input request.

use crate::{
    constants::{SCREENSHOT_EXTENSION, SCREENSHOT_PREFIX, SCREENSHOT_RANDOM_MAX, SCREENSHOT_RANDOM_MIN},
    gesture::Gesture,
    landmarks::{LandmarkPoint, LandmarkSet, INDEX_FINGER_TIP},
    utils::scale_to_pixels,
    Error, Result,
};
use image::RgbImage;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Mouse buttons the dispatcher can click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// OS facility that moves the pointer, injects clicks and grabs the screen
pub trait InputSimulator {
    /// Warp the pointer to absolute screen coordinates
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press a button at the current pointer position
    fn press(&mut self, button: MouseButton) -> Result<()>;

    /// Release a previously pressed button
    fn release(&mut self, button: MouseButton) -> Result<()>;

    /// Left double click at the current pointer position
    fn double_click(&mut self) -> Result<()>;

    /// Capture the whole screen
    fn screenshot(&mut self) -> Result<RgbImage>;

    /// Screen size in pixels as `(width, height)`
    fn screen_size(&self) -> (u32, u32);
}

/// Screen pixel the pointer is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTarget {
    pub x: i32,
    pub y: i32,
}

impl PointerTarget {
    /// Scale a normalized landmark onto the screen, truncating toward zero
    ///
    /// # Errors
    ///
    /// Returns an error if the landmark coordinates are not finite
    pub fn from_landmark(point: LandmarkPoint, screen_size: (u32, u32)) -> Result<Self> {
        let (x, y) = scale_to_pixels(point, screen_size.0, screen_size.1)?;
        Ok(Self { x, y })
    }
}

/// How screenshot files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenshotNaming {
    /// `my_screenshot_<1..=1000>.png`, later captures may overwrite earlier ones
    #[default]
    Random,
    /// `my_screenshot_<unix millis>.png`, strictly increasing within a run
    Timestamp,
}

impl FromStr for ScreenshotNaming {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "timestamp" => Ok(Self::Timestamp),
            other => Err(Error::ConfigError(format!("Unknown screenshot naming: {other}"))),
        }
    }
}

/// Where and how screenshots are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotSettings {
    /// Output directory, the working directory by default
    pub directory: PathBuf,
    pub naming: ScreenshotNaming,
}

impl Default for ScreenshotSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            naming: ScreenshotNaming::default(),
        }
    }
}

/// What a dispatch call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Moved(PointerTarget),
    Clicked(MouseButton),
    DoubleClicked,
    ScreenshotSaved(PathBuf),
    Idle,
}

/// Owns the input simulator and executes one action per gesture
pub struct ActionDispatcher<I> {
    input: I,
    screenshots: ScreenshotSettings,
    last_timestamp: u128,
}

impl<I: InputSimulator> ActionDispatcher<I> {
    pub fn new(input: I, screenshots: ScreenshotSettings) -> Self {
        Self {
            input,
            screenshots,
            last_timestamp: 0,
        }
    }

    /// Execute the action for `gesture`
    ///
    /// # Errors
    ///
    /// Returns an error if the input simulator rejects the request or the
    /// screenshot cannot be written
    pub fn dispatch(&mut self, gesture: Gesture, landmarks: &LandmarkSet) -> Result<DispatchOutcome> {
        match gesture {
            Gesture::Move => {
                let tip = landmarks
                    .get(INDEX_FINGER_TIP)
                    .ok_or_else(|| Error::InvalidInput("Index fingertip landmark missing".to_string()))?;
                let target = PointerTarget::from_landmark(tip, self.input.screen_size())?;
                debug!("Moving pointer to ({}, {})", target.x, target.y);
                self.input.move_to(target.x, target.y)?;
                Ok(DispatchOutcome::Moved(target))
            }
            Gesture::LeftClick => self.click(MouseButton::Left),
            Gesture::RightClick => self.click(MouseButton::Right),
            Gesture::DoubleClick => {
                debug!("Double click");
                self.input.double_click()?;
                Ok(DispatchOutcome::DoubleClicked)
            }
            Gesture::Screenshot => {
                let image = self.input.screenshot()?;
                let path = self.screenshots.directory.join(self.next_file_name());
                image.save(&path)?;
                info!("Screenshot saved to {}", path.display());
                Ok(DispatchOutcome::ScreenshotSaved(path))
            }
            Gesture::None => Ok(DispatchOutcome::Idle),
        }
    }

    fn click(&mut self, button: MouseButton) -> Result<DispatchOutcome> {
        debug!("{button:?} click");
        self.input.press(button)?;
        self.input.release(button)?;
        Ok(DispatchOutcome::Clicked(button))
    }

    fn next_file_name(&mut self) -> String {
        let suffix = match self.screenshots.naming {
            ScreenshotNaming::Random => {
                u128::from(rand::thread_rng().gen_range(SCREENSHOT_RANDOM_MIN..=SCREENSHOT_RANDOM_MAX))
            }
            ScreenshotNaming::Timestamp => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |elapsed| elapsed.as_millis());
                self.last_timestamp = now.max(self.last_timestamp + 1);
                self.last_timestamp
            }
        };
        format!("{SCREENSHOT_PREFIX}{suffix}.{SCREENSHOT_EXTENSION}")
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        MoveTo(i32, i32),
        Press(MouseButton),
        Release(MouseButton),
        DoubleClick,
        Screenshot,
    }

    #[derive(Default)]
    struct RecordingInput {
        calls: Vec<Call>,
    }

    impl InputSimulator for RecordingInput {
        fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
            self.calls.push(Call::MoveTo(x, y));
            Ok(())
        }

        fn press(&mut self, button: MouseButton) -> Result<()> {
            self.calls.push(Call::Press(button));
            Ok(())
        }

        fn release(&mut self, button: MouseButton) -> Result<()> {
            self.calls.push(Call::Release(button));
            Ok(())
        }

        fn double_click(&mut self) -> Result<()> {
            self.calls.push(Call::DoubleClick);
            Ok(())
        }

        fn screenshot(&mut self) -> Result<RgbImage> {
            self.calls.push(Call::Screenshot);
            Ok(RgbImage::new(4, 3))
        }

        fn screen_size(&self) -> (u32, u32) {
            (1920, 1080)
        }
    }

    fn hand() -> LandmarkSet {
        let mut points = vec![(0.5, 0.5); 21];
        points[INDEX_FINGER_TIP] = (0.25, 0.75);
        points.into()
    }

    fn dispatcher(directory: PathBuf, naming: ScreenshotNaming) -> ActionDispatcher<RecordingInput> {
        ActionDispatcher::new(RecordingInput::default(), ScreenshotSettings { directory, naming })
    }

    fn suffix_of(path: &std::path::Path) -> u128 {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        name.strip_prefix("my_screenshot_")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_move_targets_index_fingertip() {
        let mut dispatcher = dispatcher(PathBuf::from("."), ScreenshotNaming::Random);
        let outcome = dispatcher.dispatch(Gesture::Move, &hand()).unwrap();

        assert_eq!(outcome, DispatchOutcome::Moved(PointerTarget { x: 480, y: 810 }));
        assert_eq!(dispatcher.input().calls, vec![Call::MoveTo(480, 810)]);
    }

    #[test]
    fn test_clicks_press_then_release() {
        let mut dispatcher = dispatcher(PathBuf::from("."), ScreenshotNaming::Random);
        dispatcher.dispatch(Gesture::LeftClick, &hand()).unwrap();
        dispatcher.dispatch(Gesture::RightClick, &hand()).unwrap();

        assert_eq!(
            dispatcher.input().calls,
            vec![
                Call::Press(MouseButton::Left),
                Call::Release(MouseButton::Left),
                Call::Press(MouseButton::Right),
                Call::Release(MouseButton::Right),
            ]
        );
    }

    #[test]
    fn test_double_click_does_not_reposition() {
        let mut dispatcher = dispatcher(PathBuf::from("."), ScreenshotNaming::Random);
        let outcome = dispatcher.dispatch(Gesture::DoubleClick, &hand()).unwrap();

        assert_eq!(outcome, DispatchOutcome::DoubleClicked);
        assert_eq!(dispatcher.input().calls, vec![Call::DoubleClick]);
    }

    #[test]
    fn test_none_is_idle() {
        let mut dispatcher = dispatcher(PathBuf::from("."), ScreenshotNaming::Random);
        assert_eq!(dispatcher.dispatch(Gesture::None, &hand()).unwrap(), DispatchOutcome::Idle);
        assert!(dispatcher.input().calls.is_empty());
    }

    #[test]
    fn test_random_screenshot_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = dispatcher(dir.path().to_path_buf(), ScreenshotNaming::Random);

        let DispatchOutcome::ScreenshotSaved(path) = dispatcher.dispatch(Gesture::Screenshot, &hand()).unwrap() else {
            panic!("expected a saved screenshot");
        };

        assert!(path.exists());
        assert_eq!(path.parent(), Some(dir.path()));
        assert!((1..=1000).contains(&suffix_of(&path)));
        assert_eq!(dispatcher.input().calls, vec![Call::Screenshot]);
    }

    #[test]
    fn test_timestamp_names_strictly_increase() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = dispatcher(dir.path().to_path_buf(), ScreenshotNaming::Timestamp);

        let mut previous = 0;
        for _ in 0..3 {
            let DispatchOutcome::ScreenshotSaved(path) = dispatcher.dispatch(Gesture::Screenshot, &hand()).unwrap() else {
                panic!("expected a saved screenshot");
            };
            let suffix = suffix_of(&path);
            assert!(suffix > previous);
            previous = suffix;
        }
    }

    #[test]
    fn test_screenshot_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = dispatcher(dir.path().join("missing"), ScreenshotNaming::Random);
        assert!(dispatcher.dispatch(Gesture::Screenshot, &hand()).is_err());
    }

    #[test]
    fn test_naming_from_str() {
        assert_eq!("random".parse::<ScreenshotNaming>().unwrap(), ScreenshotNaming::Random);
        assert_eq!("Timestamp".parse::<ScreenshotNaming>().unwrap(), ScreenshotNaming::Timestamp);
        assert!("counter".parse::<ScreenshotNaming>().is_err());
    }
}
