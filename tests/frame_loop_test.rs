//! Frame loop termination, resource release and dispatch failure handling


use hand_gesture_mouse::{app::DispatchFailurePolicy, dispatcher::MouseButton, Error};
use test_helpers::{
    build_app, synthetic_hand, InputEvent, RecordingInput, RecordingRenderer, ScriptedDetector, ScriptedVideo,
};

fn left_click_detector(frames: &[u32]) -> ScriptedDetector {
    frames.iter().fold(ScriptedDetector::default(), |detector, &frame| {
        detector.with_hand(frame, synthetic_hand(30.0, 120.0, 80.0))
    })
}

#[test]
fn test_loop_ends_with_source() {
    let dir = tempfile::tempdir().unwrap();
    let video = ScriptedVideo::new(1..=3);
    let releases = video.releases.clone();
    let app = build_app(
        video,
        ScriptedDetector::default(),
        RecordingInput::new(),
        None,
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    let summary = app.run().unwrap();

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.gestures_dispatched, 0);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_empty_source_processes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let video = ScriptedVideo::new(Vec::new());
    let releases = video.releases.clone();
    let app = build_app(
        video,
        ScriptedDetector::default(),
        RecordingInput::new(),
        Some(RecordingRenderer::new()),
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    assert_eq!(app.run().unwrap().frames, 0);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_quit_key_stops_loop() {
    let dir = tempfile::tempdir().unwrap();
    let video = ScriptedVideo::new(1..=10);
    let releases = video.releases.clone();
    let renderer = RecordingRenderer::quitting_after(2);
    let labels = renderer.labels.clone();
    let app = build_app(
        video,
        ScriptedDetector::default(),
        RecordingInput::new(),
        Some(renderer),
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    let summary = app.run().unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(labels.borrow().len(), 2);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_capture_error_releases_source() {
    let dir = tempfile::tempdir().unwrap();
    let video = ScriptedVideo::new(1..=3).failing_on(2);
    let releases = video.releases.clone();
    let app = build_app(
        video,
        ScriptedDetector::default(),
        RecordingInput::new(),
        None,
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    let result = app.run();

    assert!(matches!(result, Err(Error::CaptureFailure(_))));
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_detector_error_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let video = ScriptedVideo::new(1..=3);
    let releases = video.releases.clone();
    let app = build_app(
        video,
        ScriptedDetector::default().failing_on(1),
        RecordingInput::new(),
        None,
        DispatchFailurePolicy::LogAndContinue,
        dir.path(),
    );

    assert!(matches!(app.run(), Err(Error::ModelError(_))));
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_dispatch_failure_aborts_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let video = ScriptedVideo::new(1..=3);
    let releases = video.releases.clone();
    let app = build_app(
        video,
        left_click_detector(&[2]),
        RecordingInput::failing(),
        None,
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    assert!(matches!(app.run(), Err(Error::X11(_))));
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_dispatch_failure_logged_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = RecordingRenderer::new();
    let labels = renderer.labels.clone();
    let skeletons = renderer.skeletons.clone();
    let app = build_app(
        ScriptedVideo::new(1..=3),
        left_click_detector(&[1, 3]),
        RecordingInput::failing(),
        Some(renderer),
        DispatchFailurePolicy::LogAndContinue,
        dir.path(),
    );

    let summary = app.run().unwrap();

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.gestures_dispatched, 0);
    assert_eq!(summary.dispatch_failures, 2);
    // Landmarks are still drawn, the label only appears for actions that happened
    assert_eq!(skeletons.get(), 2);
    assert_eq!(*labels.borrow(), vec![None, None, None]);
}

#[test]
fn test_every_qualifying_frame_fires() {
    let dir = tempfile::tempdir().unwrap();
    let input = RecordingInput::new();
    let events = input.events.clone();
    let app = build_app(
        ScriptedVideo::new(1..=4),
        left_click_detector(&[1, 2, 3, 4]),
        input,
        None,
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    let summary = app.run().unwrap();

    assert_eq!(summary.gestures_dispatched, 4);
    let clicks = [InputEvent::Press(MouseButton::Left), InputEvent::Release(MouseButton::Left)];
    assert_eq!(*events.borrow(), clicks.repeat(4));
}

#[test]
fn test_frames_without_hand_render_plain() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = RecordingRenderer::new();
    let labels = renderer.labels.clone();
    let skeletons = renderer.skeletons.clone();
    let app = build_app(
        ScriptedVideo::new(1..=3),
        left_click_detector(&[2]),
        RecordingInput::new(),
        Some(renderer),
        DispatchFailurePolicy::Abort,
        dir.path(),
    );

    let summary = app.run().unwrap();

    assert_eq!(summary.gestures_dispatched, 1);
    assert_eq!(skeletons.get(), 1);
    assert_eq!(*labels.borrow(), vec![None, Some("Left Click"), None]);
}

#[test]
fn test_summary_tracks_processed_frames() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(
        ScriptedVideo::new(Vec::new()),
        left_click_detector(&[1]),
        RecordingInput::failing(),
        None,
        DispatchFailurePolicy::LogAndContinue,
        dir.path(),
    );

    app.process_frame(&1).unwrap();
    app.process_frame(&2).unwrap();

    // Frames are counted by the loop, actions by process_frame
    let summary = app.summary();
    assert_eq!(summary.frames, 0);
    assert_eq!(summary.gestures_dispatched, 0);
    assert_eq!(summary.dispatch_failures, 1);
}
