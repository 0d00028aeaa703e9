//! Start/stop control logic for speech recognition.
//!
//! Two controls drive one recognizer. `is_recognizing` follows the
//! recognizer's own lifecycle events rather than the clicks, so a click
//! while a start or stop is still in flight is ignored.

use crate::animation::AnimationSystem;
use crate::director::AnimationDirector;
use crate::speech::SpeechRecognizer;

/// Enabled state of the two recognition controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            start_enabled: true,
            stop_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecognitionController {
    is_recognizing: bool,
    controls: ControlState,
    last_transcript: Option<String>,
}

impl RecognitionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_recognizing(&self) -> bool {
        self.is_recognizing
    }

    #[must_use]
    pub fn controls(&self) -> ControlState {
        self.controls
    }

    #[must_use]
    pub fn last_transcript(&self) -> Option<&str> {
        self.last_transcript.as_deref()
    }

    /// Starts recognition unless it is already running.
    ///
    /// Returns whether a start was requested. A recognizer error is logged
    /// and leaves the controls unchanged.
    pub fn on_start_clicked(&mut self, recognizer: &mut dyn SpeechRecognizer) -> bool {
        if self.is_recognizing {
            return false;
        }
        if let Err(err) = recognizer.start() {
            log::error!("Failed to start speech recognition: {err}");
            return false;
        }
        self.controls = ControlState {
            start_enabled: false,
            stop_enabled: true,
        };
        true
    }

    /// Stops recognition and plays the nod.
    ///
    /// Does nothing unless recognition is running. The nod is triggered even
    /// if the recognizer reports an error while stopping.
    pub fn on_stop_clicked(
        &mut self,
        recognizer: &mut dyn SpeechRecognizer,
        director: &AnimationDirector,
        animations: &mut AnimationSystem,
    ) -> bool {
        if !self.is_recognizing {
            return false;
        }
        if let Err(err) = recognizer.stop() {
            log::error!("Failed to stop speech recognition: {err}");
        }
        self.controls = ControlState {
            start_enabled: true,
            stop_enabled: false,
        };
        if !director.trigger_primary(animations) {
            log::debug!("No nod clip loaded; nothing to play");
        }
        true
    }

    pub fn on_recognition_started(&mut self) {
        self.is_recognizing = true;
        log::info!("Speech recognition started");
    }

    pub fn on_recognition_ended(&mut self) {
        self.is_recognizing = false;
        log::info!("Speech recognition ended");
    }

    pub fn on_recognition_result(&mut self, transcript: &str) {
        log::info!("Recognized: {transcript}");
        self.last_transcript = Some(transcript.to_string());
    }

    /// Errors are reported only. The controls keep their current state.
    pub fn on_recognition_error(&mut self, error: &str) {
        log::error!("Speech recognition error: {error}");
    }
}
