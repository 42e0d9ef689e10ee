use crate::{
    constants::{DEFAULT_DETECTOR_INPUT_SIZE, LANDMARK_OUTPUT_STRIDE, NUM_HAND_LANDMARKS},
    landmarks::{LandmarkPoint, LandmarkSet},
    utils::safe_cast::f64_to_i32,
    Error, Result,
};
use ndarray::{Array4, CowArray};
use opencv::core::{self, Mat, Scalar, Size, Vec3f, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Finds at most one hand in a frame
pub trait LandmarkDetector<F> {
    /// Landmarks of the most prominent hand, `None` when no hand is visible
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be processed
    fn detect(&mut self, frame: &F) -> Result<Option<LandmarkSet>>;
}

/// Placement of the frame inside the square model input
#[derive(Debug, Clone, Copy, PartialEq)]
struct Letterbox {
    /// Side of the padded square, in frame pixels
    side: f64,
    frame_width: f64,
    frame_height: f64,
}

impl Letterbox {
    fn new(frame_width: i32, frame_height: i32) -> Self {
        let (frame_width, frame_height) = (f64::from(frame_width), f64::from(frame_height));
        Self {
            side: frame_width.max(frame_height),
            frame_width,
            frame_height,
        }
    }

    /// Map a model-input pixel back to frame-normalized coordinates
    fn to_frame(self, x: f32, y: f32, input_size: i32) -> LandmarkPoint {
        let scale = self.side / f64::from(input_size);
        LandmarkPoint::new(
            f64::from(x) * scale / self.frame_width,
            f64::from(y) * scale / self.frame_height,
        )
    }
}

/// Hand landmark detector using `ONNX` Runtime
///
/// Expects a single-hand landmark model with NHWC float input in `[0, 1]`,
/// one output of 21 × (x, y, z) in input pixels and one hand presence score.
pub struct HandLandmarkDetector {
    session: Session,
    input_size: i32,
    presence_threshold: f32,
}

impl HandLandmarkDetector {
    /// Create a detector from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The ONNX runtime environment cannot be created
    /// - The model has no inputs
    pub fn new<P: AsRef<Path>>(model_path: P, presence_threshold: f32) -> Result<Self> {
        log::info!(
            "Initializing HandLandmarkDetector with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_landmarks")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        let input_meta = session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelError("Model has no inputs".to_string()))?;

        // NHWC: [batch, height, width, channels]
        let input_size = input_meta
            .dimensions
            .get(1)
            .copied()
            .flatten()
            .and_then(|side| i32::try_from(side).ok())
            .unwrap_or(DEFAULT_DETECTOR_INPUT_SIZE);

        log::info!("Hand landmark model input size: {input_size}x{input_size}");

        Ok(Self {
            session,
            input_size,
            presence_threshold,
        })
    }

    /// Pad the frame to a square, resize, convert to RGB and normalize
    #[allow(clippy::cast_sign_loss)] // Input size is positive
    fn preprocess(&self, frame: &Mat) -> Result<(Array4<f32>, Letterbox)> {
        let letterbox = Letterbox::new(frame.cols(), frame.rows());
        let side = f64_to_i32(letterbox.side)?;

        // Pad right and bottom so landmark pixels keep the frame origin
        let mut square = Mat::default();
        core::copy_make_border(
            frame,
            &mut square,
            0,
            side - frame.rows(),
            0,
            side - frame.cols(),
            core::BORDER_CONSTANT,
            Scalar::all(0.0),
        )?;

        let mut resized = Mat::default();
        imgproc::resize(
            &square,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let size = self.input_size as usize;
        let mut data = Vec::with_capacity(size * size * 3);
        for row in 0..self.input_size {
            for col in 0..self.input_size {
                let pixel = float_image.at_2d::<Vec3f>(row, col)?;
                data.extend_from_slice(&[pixel[0], pixel[1], pixel[2]]);
            }
        }

        let array = Array4::from_shape_vec((1, size, size, 3), data)
            .map_err(|e| Error::ModelError(format!("Failed to create input array: {e}")))?;

        Ok((array, letterbox))
    }

    /// Run the model, returning flattened landmarks and the presence score
    fn forward(&self, input: Array4<f32>) -> Result<(Vec<f32>, Option<f32>)> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        let mut landmarks = None;
        let mut presence = None;
        for output in &outputs {
            let tensor = output.try_extract::<f32>()?;
            let view = tensor.view();
            let values = view
                .as_slice()
                .ok_or_else(|| Error::ModelOutputError("Failed to get output data".to_string()))?;

            match values.len() {
                n if n == NUM_HAND_LANDMARKS * LANDMARK_OUTPUT_STRIDE && landmarks.is_none() => {
                    landmarks = Some(values.to_vec());
                }
                1 if presence.is_none() => presence = Some(values[0]),
                _ => {}
            }
        }

        let landmarks = landmarks.ok_or_else(|| {
            Error::ModelOutputError(format!(
                "No output with {} landmark values",
                NUM_HAND_LANDMARKS * LANDMARK_OUTPUT_STRIDE
            ))
        })?;

        Ok((landmarks, presence))
    }
}

impl LandmarkDetector<Mat> for HandLandmarkDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>> {
        if frame.empty() {
            return Ok(None);
        }

        let (input, letterbox) = self.preprocess(frame)?;
        let (raw, presence) = self.forward(input)?;

        if !hand_present(presence, self.presence_threshold)? {
            return Ok(None);
        }

        Ok(Some(decode_landmarks(&raw, letterbox, self.input_size)))
    }
}

/// Presence gate; landmarks are meaningless without a presence score
fn hand_present(presence: Option<f32>, threshold: f32) -> Result<bool> {
    let score = presence.ok_or_else(|| Error::ModelOutputError("Model has no hand presence output".to_string()))?;
    if score < threshold {
        log::debug!("Hand presence {score:.2} below threshold");
        return Ok(false);
    }
    Ok(true)
}

/// Convert flattened (x, y, z) model output into frame-normalized landmarks
fn decode_landmarks(raw: &[f32], letterbox: Letterbox, input_size: i32) -> LandmarkSet {
    raw.chunks_exact(LANDMARK_OUTPUT_STRIDE)
        .take(NUM_HAND_LANDMARKS)
        .map(|xyz| letterbox.to_frame(xyz[0], xyz[1], input_size))
        .collect()
}
