use crate::errors::{NodError, Result};
use crate::event::{EventSender, ViewerEvent};
use crate::speech::{RecognitionSettings, SpeechRecognizer};

/// Recognizer without a microphone.
///
/// Mirrors the browser lifecycle: `start` reports `RecognitionStarted`,
/// `stop` reports `RecognitionEnded`, and starting twice is rejected.
/// Transcripts and errors are injected by the caller.
#[derive(Debug)]
pub struct SimulatedRecognizer {
    settings: RecognitionSettings,
    sender: EventSender,
    active: bool,
}

impl SimulatedRecognizer {
    #[must_use]
    pub fn new(settings: RecognitionSettings, sender: EventSender) -> Self {
        log::info!("Using simulated speech recognition ({})", settings.lang);
        Self {
            settings,
            sender,
            active: false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Reports a final transcript, as if the user had spoken.
    pub fn inject_transcript(&self, transcript: impl Into<String>) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.sender.send(ViewerEvent::RecognitionResult {
            transcript: transcript.into(),
        })
    }

    /// Reports a recognition error; the session ends afterwards.
    pub fn inject_error(&mut self, error: impl Into<String>) -> Result<()> {
        self.sender.send(ViewerEvent::RecognitionError(error.into()))?;
        if self.active {
            self.active = false;
            self.sender.send(ViewerEvent::RecognitionEnded)?;
        }
        Ok(())
    }
}

impl SpeechRecognizer for SimulatedRecognizer {
    fn start(&mut self) -> Result<()> {
        if self.active {
            return Err(NodError::SpeechError("recognition has already started".to_string()));
        }
        self.active = true;
        self.sender.send(ViewerEvent::RecognitionStarted)
    }

    fn stop(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.sender.send(ViewerEvent::RecognitionEnded)
    }

    fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }
}
