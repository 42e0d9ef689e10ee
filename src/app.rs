//! Main application module: the capture, detect, classify, dispatch loop.

use crate::{
    config::Config,
    dispatcher::{ActionDispatcher, DispatchOutcome, InputSimulator},
    error::{Error, Result},
    gesture::{classify, Gesture, GestureLabel},
    hand_detection::LandmarkDetector,
    landmarks::LandmarkSet,
    render::Renderer,
    video::VideoSource,
};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

/// Reaction to a failed OS action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchFailurePolicy {
    /// Stop the loop and return the error
    #[default]
    Abort,
    /// Log the failure, skip the frame and keep running
    LogAndContinue,
}

impl FromStr for DispatchFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "log_and_continue" | "continue" => Ok(Self::LogAndContinue),
            other => Err(Error::ConfigError(format!("Unknown dispatch failure policy: {other}"))),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Reaction to a failed OS action
    pub dispatch_failure: DispatchFailurePolicy,
}

impl From<&Config> for AppConfig {
    fn from(config: &Config) -> Self {
        Self {
            dispatch_failure: config.actions.dispatch_failure,
        }
    }
}

/// Result of processing a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Landmarks found this frame, `None` when no hand was detected
    pub landmarks: Option<LandmarkSet>,
    /// Classified gesture
    pub gesture: Gesture,
    /// Action taken, `None` when dispatch failed and the policy continued
    pub outcome: Option<DispatchOutcome>,
}

impl FrameReport {
    /// Label to draw, only for actions that went through
    #[must_use]
    pub fn label(&self) -> Option<GestureLabel> {
        self.outcome.as_ref().and(self.gesture.label())
    }
}

/// Totals for one run of the frame loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames read from the video source
    pub frames: u64,
    /// Frames whose gesture triggered an OS action
    pub gestures_dispatched: u64,
    /// OS actions that failed under [`DispatchFailurePolicy::LogAndContinue`]
    pub dispatch_failures: u64,
}

/// Frame loop owning every collaborator for its lifetime
pub struct GestureApp<V, D, I, R> {
    config: AppConfig,
    video: V,
    detector: D,
    dispatcher: ActionDispatcher<I>,
    renderer: Option<R>,
    summary: RunSummary,
}

impl<V, D, I, R> GestureApp<V, D, I, R>
where
    V: VideoSource,
    D: LandmarkDetector<V::Frame>,
    I: InputSimulator,
    R: Renderer<V::Frame>,
{
    /// Assemble the application; `renderer` is `None` for headless runs
    pub fn new(config: AppConfig, video: V, detector: D, dispatcher: ActionDispatcher<I>, renderer: Option<R>) -> Self {
        info!("Initializing hand gesture application");
        Self {
            config,
            video,
            detector,
            dispatcher,
            renderer,
            summary: RunSummary::default(),
        }
    }

    /// Detect, classify and dispatch for one frame
    ///
    /// # Errors
    ///
    /// Returns an error if detection fails, or if dispatch fails under
    /// [`DispatchFailurePolicy::Abort`]
    pub fn process_frame(&mut self, frame: &V::Frame) -> Result<FrameReport> {
        let Some(landmarks) = self.detector.detect(frame)? else {
            return Ok(FrameReport {
                landmarks: None,
                gesture: Gesture::None,
                outcome: Some(DispatchOutcome::Idle),
            });
        };

        let gesture = classify(&landmarks);
        if !gesture.is_action() {
            return Ok(FrameReport {
                landmarks: Some(landmarks),
                gesture,
                outcome: Some(DispatchOutcome::Idle),
            });
        }

        debug!("Gesture detected: {}", gesture);
        let outcome = match self.dispatcher.dispatch(gesture, &landmarks) {
            Ok(outcome) => {
                self.summary.gestures_dispatched += 1;
                Some(outcome)
            }
            Err(e) => match self.config.dispatch_failure {
                DispatchFailurePolicy::Abort => return Err(e),
                DispatchFailurePolicy::LogAndContinue => {
                    warn!("Failed to execute {}: {}", gesture, e);
                    self.summary.dispatch_failures += 1;
                    None
                }
            },
        };

        Ok(FrameReport {
            landmarks: Some(landmarks),
            gesture,
            outcome,
        })
    }

    /// Run until the source stops, the user quits or a fatal error occurs
    ///
    /// Consumes the application so the video source, input simulator and
    /// renderer are released on every exit path.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error raised inside the loop
    pub fn run(mut self) -> Result<RunSummary> {
        info!("Starting main application loop");
        let start_time = Instant::now();

        let result = self.run_loop();

        if let Err(e) = self.video.release() {
            warn!("Failed to release video source: {}", e);
        }

        match &result {
            Ok(summary) => {
                let elapsed = start_time.elapsed().as_secs_f64();
                #[allow(clippy::cast_precision_loss)] // Frame counts stay far below 2^52
                let fps = if elapsed > 0.0 { summary.frames as f64 / elapsed } else { 0.0 };
                info!(
                    "Application shutting down: {} frames ({:.1} FPS), {} actions, {} failed",
                    summary.frames, fps, summary.gestures_dispatched, summary.dispatch_failures
                );
            }
            Err(e) => error!("Frame loop aborted: {}", e),
        }

        result
    }

    fn run_loop(&mut self) -> Result<RunSummary> {
        loop {
            let Some(mut frame) = self.video.read()? else {
                info!("Video source stopped yielding frames");
                break;
            };
            self.summary.frames += 1;
            debug!("Processing frame {}", self.summary.frames);

            let report = self.process_frame(&frame)?;

            if let Some(renderer) = &mut self.renderer {
                renderer.render(&mut frame, report.landmarks.as_ref(), report.label().as_ref())?;

                if renderer.quit_requested()? {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        Ok(self.summary)
    }

    /// Totals so far
    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("abort".parse::<DispatchFailurePolicy>().unwrap(), DispatchFailurePolicy::Abort);
        assert_eq!(
            "log_and_continue".parse::<DispatchFailurePolicy>().unwrap(),
            DispatchFailurePolicy::LogAndContinue
        );
        assert!("retry".parse::<DispatchFailurePolicy>().is_err());
    }

    #[test]
    fn test_policy_default_is_abort() {
        assert_eq!(AppConfig::default().dispatch_failure, DispatchFailurePolicy::Abort);
    }

    #[test]
    fn test_label_hidden_after_failed_dispatch() {
        let report = FrameReport {
            landmarks: None,
            gesture: Gesture::LeftClick,
            outcome: None,
        };
        assert!(report.label().is_none());

        let report = FrameReport {
            outcome: Some(DispatchOutcome::Clicked(crate::dispatcher::MouseButton::Left)),
            ..report
        };
        assert_eq!(report.label().map(|l| l.text), Some("Left Click"));
    }
}
