use std::sync::Arc;

use glam::Vec3;
use slotmap::SlotMap;

use crate::assets::BackgroundImage;
use crate::scene::bounds::BoundingBox;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, NodeHandle};

/// What the renderer clears the frame to.
#[derive(Debug, Clone)]
pub enum Background {
    Color(Vec3),
    Image(Arc<BackgroundImage>),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Vec3::ZERO)
    }
}

/// Scene graph.
///
/// Pure data: nodes, cameras, lights and the background. Rendering is
/// handled elsewhere through [`RenderBackend`](crate::render::RenderBackend).
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,

    pub background: Background,
    pub active_camera: Option<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Adds a camera on its own root node.
    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let key = self.cameras.insert(camera);
        let mut node = Node::new("Camera");
        node.camera = Some(key);
        self.add_node(node)
    }

    /// Adds a light on its own root node placed at `position`.
    pub fn add_light(&mut self, light: Light, position: Vec3) -> NodeHandle {
        let key = self.lights.insert(light);
        let mut node = Node::new("Light");
        node.light = Some(key);
        node.transform.position = position;
        self.add_node(node)
    }

    /// Re-parents `child` under `parent`.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach");
            return;
        }

        match self.nodes.get(child).map(|n| n.parent) {
            Some(Some(old_parent)) => {
                if let Some(n) = self.nodes.get_mut(old_parent) {
                    n.children.retain(|&c| c != child);
                }
            }
            Some(None) => self.root_nodes.retain(|&r| r != child),
            None => return,
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    /// Depth-first search for `name` in the subtree rooted at `root`.
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Returns the (Transform, Camera) pair of the active camera.
    pub fn query_main_camera_bundle(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let node_id = self.active_camera?;
        let camera_key = self.nodes.get(node_id)?.camera?;
        let camera = self.cameras.get_mut(camera_key)?;
        let transform = &mut self.nodes.get_mut(node_id)?.transform;
        Some((transform, camera))
    }

    /// Read-only view of the active camera and its node.
    #[must_use]
    pub fn main_camera(&self) -> Option<(&Node, &Camera)> {
        let node = self.nodes.get(self.active_camera?)?;
        let camera = self.cameras.get(node.camera?)?;
        Some((node, camera))
    }

    pub fn iter_lights(&self) -> impl Iterator<Item = (&Node, &Light)> {
        self.nodes
            .values()
            .filter_map(|node| Some((node, self.lights.get(node.light?)?)))
    }

    /// Recomputes local and world matrices of every node, parents first.
    pub fn update_world_matrices(&mut self) {
        let mut stack: Vec<(NodeHandle, glam::Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&root| (root, glam::Affine3A::IDENTITY))
            .collect();

        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            let world = parent_world * node.transform.update_local_matrix();
            node.transform.world_matrix = world;
            stack.extend(node.children.iter().map(|&child| (child, world)));
        }
    }

    /// World-space bounds of every mesh in the subtree under `root`.
    ///
    /// Refreshes world matrices first. Returns `None` when the subtree holds
    /// no mesh.
    pub fn bounding_box(&mut self, root: NodeHandle) -> Option<BoundingBox> {
        self.update_world_matrices();

        let mut result: Option<BoundingBox> = None;
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if let Some(local) = node.bounds {
                let world = local.transform(&node.transform.world_matrix);
                result = Some(match result {
                    Some(acc) => acc.union(&world),
                    None => world,
                });
            }
            stack.extend(node.children.iter().copied());
        }
        result
    }
}
