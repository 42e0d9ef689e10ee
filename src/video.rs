//! Frame acquisition from a webcam or a video file.

use crate::{Error, Result};
use log::{debug, info, warn};
use opencv::{
    core::{self, Mat},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};

/// Blocking source of frames
pub trait VideoSource {
    type Frame;

    /// Next frame, `None` once the source stops yielding frames
    ///
    /// # Errors
    ///
    /// Returns an error if the capture backend fails
    fn read(&mut self) -> Result<Option<Self::Frame>>;

    /// Release the underlying device; further reads yield `None`
    fn release(&mut self) -> Result<()>;
}

/// `OpenCV` capture handle, released when dropped
pub struct CameraSource {
    capture: VideoCapture,
    mirror: bool,
    released: bool,
}

impl CameraSource {
    /// Open a webcam by device index
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened
    pub fn open(device_index: i32, mirror: bool, buffer_size: u32) -> Result<Self> {
        info!("Opening camera {}", device_index);
        let mut capture = VideoCapture::new(device_index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::CaptureFailure(format!("Camera {device_index} could not be opened")));
        }

        if buffer_size > 0 {
            capture.set(CAP_PROP_BUFFERSIZE, f64::from(buffer_size))?;
            info!("Camera buffer size set to {}", buffer_size);
        }

        Ok(Self {
            capture,
            mirror,
            released: false,
        })
    }

    /// Open a recorded video, useful for replaying a session
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened
    pub fn from_file(path: &str, mirror: bool) -> Result<Self> {
        info!("Opening video file: {}", path);
        let capture = VideoCapture::from_file(path, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::CaptureFailure(format!("Video file {path} could not be opened")));
        }

        Ok(Self {
            capture,
            mirror,
            released: false,
        })
    }
}

impl VideoSource for CameraSource {
    type Frame = Mat;

    fn read(&mut self) -> Result<Option<Mat>> {
        if self.released {
            return Ok(None);
        }

        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            debug!("Video source returned no frame");
            return Ok(None);
        }

        if self.mirror {
            let mut mirrored = Mat::default();
            core::flip(&frame, &mut mirrored, 1)?;
            frame = mirrored;
        }

        Ok(Some(frame))
    }

    fn release(&mut self) -> Result<()> {
        if !self.released {
            self.capture.release()?;
            self.released = true;
            info!("Video source released");
        }
        Ok(())
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("Failed to release video source: {}", e);
        }
    }
}
