//! Speech recognition seam.
//!
//! The viewer only needs to start and stop a recognition session; results
//! and lifecycle changes come back asynchronously as [`ViewerEvent`]s.
//!
//! [`ViewerEvent`]: crate::event::ViewerEvent

pub mod simulated;
#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};

use crate::errors::{NodError, Result};
use crate::event::EventSender;

pub use simulated::SimulatedRecognizer;
#[cfg(target_arch = "wasm32")]
pub use web::WebSpeechRecognizer;

/// A speech recognition session that can be started and stopped.
pub trait SpeechRecognizer {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn settings(&self) -> &RecognitionSettings;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechBackend {
    /// Browser `SpeechRecognition` API (wasm32 only).
    Web,
    /// In-process stand-in that reports lifecycle events immediately.
    Simulated,
}

impl Default for SpeechBackend {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            SpeechBackend::Web
        } else {
            SpeechBackend::Simulated
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// BCP 47 language tag.
    pub lang: String,
    pub interim_results: bool,
    pub max_alternatives: u32,
    pub backend: SpeechBackend,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            lang: "ja-JP".to_string(),
            interim_results: false,
            max_alternatives: 1,
            backend: SpeechBackend::default(),
        }
    }
}

/// Builds the recognizer selected by `settings.backend`.
///
/// Fails with [`NodError::SpeechUnsupported`] when the platform has no
/// speech API. Callers treat that as fatal.
pub fn create_recognizer(settings: &RecognitionSettings, sender: EventSender) -> Result<Box<dyn SpeechRecognizer>> {
    match settings.backend {
        SpeechBackend::Simulated => Ok(Box::new(SimulatedRecognizer::new(settings.clone(), sender))),
        #[cfg(target_arch = "wasm32")]
        SpeechBackend::Web => Ok(Box::new(WebSpeechRecognizer::new(settings.clone(), sender)?)),
        #[cfg(not(target_arch = "wasm32"))]
        SpeechBackend::Web => {
            drop(sender);
            Err(NodError::SpeechUnsupported)
        }
    }
}
