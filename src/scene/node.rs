use crate::scene::bounds::BoundingBox;
use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, NodeHandle};
use glam::Affine3A;

/// A scene node.
///
/// Hierarchy is kept in `parent` / `children`; use [`Scene::attach`] to
/// change it so both sides stay in sync.
///
/// [`Scene::attach`]: crate::scene::Scene::attach
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,
    pub visible: bool,

    /// Local-space bounds of the mesh attached to this node, if any.
    pub bounds: Option<BoundingBox>,
    /// Current morph target weights of the attached mesh.
    pub morph_weights: Vec<f32>,

    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
