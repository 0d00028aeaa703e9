//! Rendering seam.
//!
//! The viewer hands a fully updated [`Scene`] to a [`RenderBackend`] once per
//! frame. [`HeadlessRenderer`] is the built-in backend: it computes what a
//! GPU backend would need each frame and records it, without drawing.

use glam::Mat4;

use crate::scene::{Background, Scene};

pub trait RenderBackend {
    fn render(&mut self, scene: &Scene);

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// What the last rendered frame contained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub view_projection: Mat4,
    pub visible_nodes: usize,
    pub light_count: usize,
    pub has_background_image: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames_rendered: u64,
    size: (u32, u32),
    last_frame: Option<FrameSummary>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameSummary> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl RenderBackend for HeadlessRenderer {
    fn render(&mut self, scene: &Scene) {
        let Some((node, camera)) = scene.main_camera() else {
            log::trace!("No active camera; frame skipped");
            return;
        };

        self.last_frame = Some(FrameSummary {
            view_projection: camera.view_projection(node.world_matrix()),
            visible_nodes: scene.nodes.values().filter(|n| n.visible).count(),
            light_count: scene.iter_lights().count(),
            has_background_image: matches!(scene.background, Background::Image(_)),
        });
        self.frames_rendered += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}
