//! Inbound events.
//!
//! Everything that happens outside the frame loop (asset loads finishing,
//! control clicks, speech recognition lifecycle) is turned into a
//! [`ViewerEvent`] and pushed through one FIFO channel. The viewer drains the
//! channel at the start of each frame and handles events synchronously in
//! arrival order.

use std::sync::Arc;

use crate::assets::{BackgroundImage, ModelData};
use crate::errors::Result;

#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// The model finished loading and its clips are available.
    AssetLoaded(Box<ModelData>),
    /// The model could not be loaded.
    AssetLoadFailed(String),
    BackgroundLoaded(Arc<BackgroundImage>),
    BackgroundLoadFailed(String),

    /// The "start recognition" control was activated.
    StartClicked,
    /// The "stop recognition" control was activated.
    StopClicked,

    RecognitionStarted,
    RecognitionResult { transcript: String },
    RecognitionEnded,
    RecognitionError(String),
}

/// Cloneable, thread-safe producer side of the event channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: flume::Sender<ViewerEvent>,
}

impl EventSender {
    pub fn send(&self, event: ViewerEvent) -> Result<()> {
        self.inner.send(event)?;
        Ok(())
    }

    /// Sends, logging instead of failing when the viewer is gone.
    pub fn send_or_log(&self, event: ViewerEvent) {
        if let Err(err) = self.send(event) {
            log::warn!("Dropped event: {err}");
        }
    }
}

/// Consumer side of the event channel, owned by the viewer.
#[derive(Debug)]
pub struct EventQueue {
    sender: flume::Sender<ViewerEvent>,
    receiver: flume::Receiver<ViewerEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: self.sender.clone(),
        }
    }

    /// Removes and returns every pending event, preserving arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<ViewerEvent> {
        self.receiver.try_iter().collect()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.receiver.is_empty()
    }
}
