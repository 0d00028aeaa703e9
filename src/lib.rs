//! # Nod Viewer
//!
//! A small model viewer that loads a glTF character, orbits a camera around
//! it, plays its idle clips on loop, and nods when speech recognition stops.
//!
//! ## Architecture
//!
//! - [`scene`]: node graph, cameras, lights and bounds
//! - [`animation`]: keyframe tracks, clips, actions and mixers
//! - [`director`]: name-based clip roles and the nod trigger
//! - [`speech`] / [`controller`]: recognizer seam and start/stop logic
//! - [`viewer`]: per-frame orchestration over a single event queue
//! - [`app`]: desktop (winit) and browser shells
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nod_viewer::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     env_logger::init();
//!     let viewer = Viewer::with_settings(ViewerSettings::default())?;
//!     viewer.load_assets();
//!     App::new().run(viewer, HeadlessRenderer::new())?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod controller;
pub mod director;
pub mod errors;
pub mod event;
pub mod input;
pub mod render;
pub mod scene;
pub mod settings;
pub mod speech;
pub mod utils;
pub mod viewer;

pub use animation::{ActionRef, AnimationAction, AnimationClip, AnimationMixer, AnimationSystem, LoopMode};
pub use controller::{ControlState, RecognitionController};
pub use director::{AnimationDirector, ClipPolicy, Role};
pub use errors::{NodError, Result};
pub use event::{EventQueue, EventSender, ViewerEvent};
pub use settings::ViewerSettings;
pub use viewer::Viewer;

/// Commonly used types in one import.
pub mod prelude {
    pub use glam::{Quat, Vec3};

    pub use crate::animation::{ActionRef, AnimationMixer, AnimationSystem, Binder, LoopMode};
    pub use crate::assets::{AssetLoader, ModelData};
    pub use crate::controller::{ControlState, RecognitionController};
    pub use crate::director::{AnimationDirector, ClipPolicy, Role};
    pub use crate::errors::{NodError, Result};
    pub use crate::event::{EventQueue, EventSender, ViewerEvent};
    pub use crate::input::Input;
    pub use crate::render::{HeadlessRenderer, RenderBackend};
    pub use crate::scene::{Camera, Light, Node, NodeHandle, Scene};
    pub use crate::settings::ViewerSettings;
    pub use crate::speech::{RecognitionSettings, SimulatedRecognizer, SpeechRecognizer};
    pub use crate::utils::orbit_control::OrbitControls;
    pub use crate::viewer::Viewer;

    #[cfg(all(feature = "winit", not(target_arch = "wasm32")))]
    pub use crate::app::App;
}
