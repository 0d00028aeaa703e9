use glam::{Affine3A, Mat4};

/// Perspective camera.
///
/// Position and orientation live in the owning node's transform; the camera
/// only carries projection state.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub(crate) projection_matrix: Mat4,
}

impl Camera {
    /// `fov` is given in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_projection_matrix();
    }

    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// View matrix for a camera placed at `world_transform`.
    #[must_use]
    pub fn view_matrix(world_transform: &Affine3A) -> Mat4 {
        Mat4::from(world_transform.inverse())
    }

    #[must_use]
    pub fn view_projection(&self, world_transform: &Affine3A) -> Mat4 {
        self.projection_matrix * Self::view_matrix(world_transform)
    }
}
