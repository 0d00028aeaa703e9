//! Scene graph: nodes, transforms, cameras, lights and bounds.

pub mod bounds;
pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;

pub use bounds::BoundingBox;
pub use camera::Camera;
pub use light::{Light, LightKind, color_from_hex};
pub use node::Node;
pub use scene::{Background, Scene};
pub use transform::Transform;

slotmap::new_key_type! {
    pub struct NodeHandle;
    pub struct CameraKey;
    pub struct LightKey;
}
