use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::image::BackgroundImage;
use crate::assets::loaders::gltf::GltfLoader;
use crate::event::{EventSender, ViewerEvent};

/// Loads assets on worker threads and reports the outcome as events.
///
/// The scene is never touched from a worker; results are applied when the
/// viewer drains its event queue.
#[derive(Clone)]
pub struct AssetLoader {
    sender: EventSender,
}

impl AssetLoader {
    #[must_use]
    pub fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// Starts loading a glTF model. Completion arrives as
    /// [`ViewerEvent::AssetLoaded`] or [`ViewerEvent::AssetLoadFailed`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_model(&self, path: impl Into<PathBuf>) -> std::thread::JoinHandle<()> {
        let path = path.into();
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            log::info!("Loading model from {}", path.display());
            let event = match GltfLoader::load(&path) {
                Ok(model) => ViewerEvent::AssetLoaded(Box::new(model)),
                Err(err) => ViewerEvent::AssetLoadFailed(err.to_string()),
            };
            sender.send_or_log(event);
        })
    }

    /// Starts loading the background image. Completion arrives as
    /// [`ViewerEvent::BackgroundLoaded`] or [`ViewerEvent::BackgroundLoadFailed`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_background(&self, path: impl Into<PathBuf>) -> std::thread::JoinHandle<()> {
        let path = path.into();
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let event = match BackgroundImage::load(&path) {
                Ok(image) => ViewerEvent::BackgroundLoaded(Arc::new(image)),
                Err(err) => ViewerEvent::BackgroundLoadFailed(err.to_string()),
            };
            sender.send_or_log(event);
        })
    }

    /// Parses an already-fetched model on the calling thread and reports it.
    pub fn submit_model_bytes(&self, bytes: &[u8]) {
        let event = match GltfLoader::load_from_slice(bytes, None) {
            Ok(model) => ViewerEvent::AssetLoaded(Box::new(model)),
            Err(err) => ViewerEvent::AssetLoadFailed(err.to_string()),
        };
        self.sender.send_or_log(event);
    }

    /// Decodes an already-fetched background image and reports it.
    pub fn submit_background_bytes(&self, bytes: &[u8]) {
        let event = match BackgroundImage::from_bytes(bytes) {
            Ok(image) => ViewerEvent::BackgroundLoaded(Arc::new(image)),
            Err(err) => ViewerEvent::BackgroundLoadFailed(err.to_string()),
        };
        self.sender.send_or_log(event);
    }
}
