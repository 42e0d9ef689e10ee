//! Camera window with the hand skeleton and gesture label overlay.

use crate::{
    constants::{ESCAPE_KEY, LABEL_FONT_SCALE, LABEL_ORIGIN, LABEL_THICKNESS, QUIT_KEY},
    gesture::GestureLabel,
    landmarks::{LandmarkSet, HAND_CONNECTIONS},
    utils::clamp_to_pixels,
    Result,
};
use log::{info, warn};
use opencv::{
    core::{Mat, Point, Scalar},
    highgui::{self, WINDOW_NORMAL},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

/// Cosmetic output stage that also reports the quit request
pub trait Renderer<F> {
    /// Draw the overlay onto `frame` and present it
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or presenting fails
    fn render(&mut self, frame: &mut F, landmarks: Option<&LandmarkSet>, label: Option<&GestureLabel>) -> Result<()>;

    /// Poll the keyboard, true once the user asked to quit
    ///
    /// # Errors
    ///
    /// Returns an error if the event queue cannot be polled
    fn quit_requested(&mut self) -> Result<bool>;
}

/// `OpenCV` `HighGUI` window, destroyed when dropped
pub struct HighGuiRenderer {
    window_name: String,
}

impl HighGuiRenderer {
    /// Create the camera window
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created
    pub fn new(window_name: &str) -> Result<Self> {
        highgui::named_window(window_name, WINDOW_NORMAL)?;
        info!("Created window '{}'", window_name);
        Ok(Self {
            window_name: window_name.to_string(),
        })
    }

    fn draw_skeleton(frame: &mut Mat, landmarks: &LandmarkSet) -> Result<()> {
        let (width, height) = (frame.cols(), frame.rows());
        let pixel = |index: usize| {
            landmarks.get(index).map(|point| {
                let (x, y) = clamp_to_pixels(point, width, height);
                Point::new(x, y)
            })
        };

        for (from, to) in HAND_CONNECTIONS {
            if let (Some(start), Some(end)) = (pixel(from), pixel(to)) {
                imgproc::line(frame, start, end, Scalar::new(255.0, 255.0, 255.0, 0.0), 2, LINE_8, 0)?;
            }
        }

        for index in 0..landmarks.len() {
            if let Some(center) = pixel(index) {
                imgproc::circle(frame, center, 4, Scalar::new(0.0, 0.0, 255.0, 0.0), -1, LINE_8, 0)?;
            }
        }

        Ok(())
    }
}

impl Renderer<Mat> for HighGuiRenderer {
    fn render(&mut self, frame: &mut Mat, landmarks: Option<&LandmarkSet>, label: Option<&GestureLabel>) -> Result<()> {
        if let Some(landmarks) = landmarks {
            Self::draw_skeleton(frame, landmarks)?;
        }

        if let Some(label) = label {
            let (b, g, r) = label.color;
            imgproc::put_text(
                frame,
                label.text,
                Point::new(LABEL_ORIGIN.0, LABEL_ORIGIN.1),
                FONT_HERSHEY_SIMPLEX,
                LABEL_FONT_SCALE,
                Scalar::new(b, g, r, 0.0),
                LABEL_THICKNESS,
                LINE_8,
                false,
            )?;
        }

        highgui::imshow(&self.window_name, frame)?;
        Ok(())
    }

    fn quit_requested(&mut self) -> Result<bool> {
        let key = highgui::wait_key(1)?;
        Ok((key & 0xFF) == QUIT_KEY || key == ESCAPE_KEY)
    }
}

impl Drop for HighGuiRenderer {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("Failed to close windows: {}", e);
        }
    }
}
