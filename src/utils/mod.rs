//! Utilities
//!
//! - [`OrbitControls`]: mouse-driven orbit camera
//! - [`time`]: wall-clock timer and animation frame stepping

pub mod orbit_control;
pub mod time;

pub use orbit_control::OrbitControls;
pub use time::{FrameClock, FrameStep, Timer};
