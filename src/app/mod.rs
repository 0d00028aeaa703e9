//! Window shells that drive a [`Viewer`](crate::viewer::Viewer).
//!
//! - [`winit`]: desktop window, keyboard stands in for the buttons
//! - [`web`]: browser page, real start/stop buttons (wasm32 only)
//! - [`dom_input`]: DOM pointer data → [`Input`](crate::input::Input), shared by the web shell

pub mod dom_input;

#[cfg(all(feature = "winit", not(target_arch = "wasm32")))]
pub mod winit;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(all(feature = "winit", not(target_arch = "wasm32")))]
pub use self::winit::App;
