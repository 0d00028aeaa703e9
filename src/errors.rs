//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`NodError`] covers all failure modes including:
//! - Asset loading and decoding errors (glTF, images, buffers)
//! - Configuration parsing errors
//! - Speech recognition availability and backend errors
//! - Event channel shutdown
//!
//! Clip classification never produces an error: unmatched or duplicate clip
//! names are accepted silently by the director.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, NodError>`.
//!
//! ```rust,ignore
//! use nod_viewer::errors::{NodError, Result};
//!
//! fn load() -> Result<()> {
//!     let model = nod_viewer::assets::load_model("nice.glb")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum NodError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// A glTF buffer could not be resolved.
    #[error("glTF buffer {index} unavailable: {reason}")]
    BufferUnavailable {
        /// Index of the buffer in the document
        index: usize,
        /// Why the buffer could not be read
        reason: String,
    },

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// Data URI parsing error.
    #[error("Data URI error: {0}")]
    DataUriError(String),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    // ========================================================================
    // I/O & Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Speech Recognition Errors
    // ========================================================================
    /// No speech recognition API is available on this platform.
    #[error("Speech recognition is not supported on this platform")]
    SpeechUnsupported,

    /// The recognition backend rejected a request.
    #[error("Speech recognition error: {0}")]
    SpeechError(String),

    // ========================================================================
    // Event Delivery Errors
    // ========================================================================
    /// The receiving side of the event channel has been dropped.
    #[error("Event channel closed")]
    ChannelClosed,

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// WASM-specific error.
    #[cfg(target_arch = "wasm32")]
    #[error("WASM error: {0}")]
    WasmError(String),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for NodError {
    fn from(err: image::ImageError) -> Self {
        NodError::ImageDecodeError(err.to_string())
    }
}

impl From<gltf::Error> for NodError {
    fn from(err: gltf::Error) -> Self {
        NodError::GltfError(err.to_string())
    }
}

impl<T> From<flume::SendError<T>> for NodError {
    fn from(_: flume::SendError<T>) -> Self {
        NodError::ChannelClosed
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for NodError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        NodError::WasmError(format!("{value:?}"))
    }
}

/// Alias for `Result<T, NodError>`.
pub type Result<T> = std::result::Result<T, NodError>;
