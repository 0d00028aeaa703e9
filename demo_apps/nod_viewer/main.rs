//! Nod Viewer
//!
//! Usage: `nod_viewer [settings.json]`
//!
//! Controls:
//! - Mouse drag: orbit (left) / pan (right)
//! - Scroll: zoom
//! - S: start speech recognition
//! - T: stop speech recognition and nod
//! - Esc: quit

use anyhow::Context;
use nod_viewer::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => ViewerSettings::from_json_file(&path).with_context(|| format!("reading settings from {path}"))?,
        None => ViewerSettings::default(),
    };

    let window = settings.window.clone();
    let viewer = Viewer::with_settings(settings).context("speech recognition unavailable")?;
    viewer.load_assets();

    log::info!("Press S to start listening, T to stop");
    App::new()
        .with_title(window.title)
        .with_size(window.width, window.height)
        .run(viewer, HeadlessRenderer::new())?;
    Ok(())
}
