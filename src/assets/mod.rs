//! Asset loading: glTF models and background images.

pub mod image;
pub mod loader;
pub mod loaders;

pub use image::BackgroundImage;
pub use loader::AssetLoader;
pub use loaders::gltf::{GltfLoader, ModelData, NodeData};

use std::path::Path;

use crate::errors::Result;

/// Loads a glTF model synchronously.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelData> {
    GltfLoader::load(path)
}

/// Parses a glTF model from memory, resolving external buffers against `base_dir`.
pub fn load_model_from_slice(bytes: &[u8], base_dir: Option<&Path>) -> Result<ModelData> {
    GltfLoader::load_from_slice(bytes, base_dir)
}

/// Loads and decodes a background image synchronously.
pub fn load_background(path: impl AsRef<Path>) -> Result<BackgroundImage> {
    BackgroundImage::load(path)
}
