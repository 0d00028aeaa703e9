//! Recognition Controller Tests
//!
//! Tests for:
//! - Initial control state
//! - Start/stop guards driven by recognizer lifecycle events
//! - Nod trigger on stop
//! - Error handling leaves controls alone

use std::sync::Arc;

use nod_viewer::animation::{ActionRef, AnimationClip, AnimationMixer, AnimationSystem};
use nod_viewer::controller::{ControlState, RecognitionController};
use nod_viewer::director::{AnimationDirector, PRIMARY_CLIP};
use nod_viewer::errors::{NodError, Result};
use nod_viewer::event::{EventQueue, ViewerEvent};
use nod_viewer::speech::{RecognitionSettings, SimulatedRecognizer, SpeechRecognizer};

/// Counts calls and optionally fails them.
#[derive(Default)]
struct CountingRecognizer {
    settings: RecognitionSettings,
    starts: usize,
    stops: usize,
    fail: bool,
}

impl SpeechRecognizer for CountingRecognizer {
    fn start(&mut self) -> Result<()> {
        self.starts += 1;
        if self.fail {
            return Err(NodError::SpeechError("not-allowed".to_string()));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stops += 1;
        if self.fail {
            return Err(NodError::SpeechError("aborted".to_string()));
        }
        Ok(())
    }

    fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }
}

fn director_with_primary(system: &mut AnimationSystem) -> (AnimationDirector, ActionRef) {
    let mut mixer = AnimationMixer::new();
    let action = mixer.clip_action(Arc::new(AnimationClip::empty(PRIMARY_CLIP, 1.0)), Vec::new());
    let reference = ActionRef {
        mixer: system.add_mixer(mixer),
        action,
    };
    let mut director = AnimationDirector::new();
    director.register_clip(PRIMARY_CLIP, reference, system);
    (director, reference)
}

#[test]
fn initial_state_allows_start_only() {
    let controller = RecognitionController::new();
    assert!(!controller.is_recognizing());
    assert_eq!(
        controller.controls(),
        ControlState {
            start_enabled: true,
            stop_enabled: false
        }
    );
}

#[test]
fn start_click_requests_start_and_swaps_controls() {
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer::default();

    assert!(controller.on_start_clicked(&mut recognizer));
    assert_eq!(recognizer.starts, 1);
    assert!(!controller.controls().start_enabled);
    assert!(controller.controls().stop_enabled);
    // not recognizing until the recognizer says so
    assert!(!controller.is_recognizing());
}

#[test]
fn start_click_while_recognizing_is_ignored() {
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer::default();
    controller.on_recognition_started();

    assert!(!controller.on_start_clicked(&mut recognizer));
    assert_eq!(recognizer.starts, 0);
}

#[test]
fn stop_click_before_recognition_started_is_ignored() {
    let mut system = AnimationSystem::new();
    let (director, primary) = director_with_primary(&mut system);
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer::default();

    controller.on_start_clicked(&mut recognizer);
    assert!(!controller.on_stop_clicked(&mut recognizer, &director, &mut system));
    assert_eq!(recognizer.stops, 0);
    assert!(!system.action(primary).unwrap().is_scheduled());
}

#[test]
fn stop_click_stops_and_nods() {
    let mut system = AnimationSystem::new();
    let (director, primary) = director_with_primary(&mut system);
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer::default();

    controller.on_start_clicked(&mut recognizer);
    controller.on_recognition_started();
    assert!(controller.on_stop_clicked(&mut recognizer, &director, &mut system));

    assert_eq!(recognizer.stops, 1);
    assert_eq!(controller.controls(), ControlState::default());
    let action = system.action(primary).unwrap();
    assert!(action.is_running());
    assert!((action.time_scale - 5.0).abs() < 1e-5);
}

#[test]
fn stop_click_without_nod_clip_still_stops() {
    let mut system = AnimationSystem::new();
    let director = AnimationDirector::new();
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer::default();

    controller.on_recognition_started();
    assert!(controller.on_stop_clicked(&mut recognizer, &director, &mut system));
    assert_eq!(recognizer.stops, 1);
}

#[test]
fn failed_start_keeps_controls() {
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer {
        fail: true,
        ..Default::default()
    };

    assert!(!controller.on_start_clicked(&mut recognizer));
    assert_eq!(controller.controls(), ControlState::default());
}

#[test]
fn recognition_error_does_not_reset_controls() {
    let mut controller = RecognitionController::new();
    let mut recognizer = CountingRecognizer::default();
    controller.on_start_clicked(&mut recognizer);
    controller.on_recognition_started();

    controller.on_recognition_error("network");
    assert!(controller.is_recognizing());
    assert!(controller.controls().stop_enabled);
}

#[test]
fn ended_event_clears_recognizing() {
    let mut controller = RecognitionController::new();
    controller.on_recognition_started();
    controller.on_recognition_ended();
    assert!(!controller.is_recognizing());
}

#[test]
fn result_is_remembered() {
    let mut controller = RecognitionController::new();
    controller.on_recognition_result("はい");
    assert_eq!(controller.last_transcript(), Some("はい"));
}

#[test]
fn simulated_recognizer_drives_lifecycle_through_events() {
    let queue = EventQueue::new();
    let mut recognizer = SimulatedRecognizer::new(RecognitionSettings::default(), queue.sender());
    let mut controller = RecognitionController::new();

    controller.on_start_clicked(&mut recognizer);
    for event in queue.drain() {
        if let ViewerEvent::RecognitionStarted = event {
            controller.on_recognition_started();
        }
    }
    assert!(controller.is_recognizing());
}
