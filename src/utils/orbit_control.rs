use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::input::{Input, MouseButton};
use crate::scene::transform::Transform;
use crate::settings::OrbitSettings;

/// Mouse-driven orbit camera.
///
/// Left drag rotates around `center`, right drag pans, the wheel zooms.
/// The camera position is expressed in spherical coordinates around the
/// center (`theta` around +Y from +Z, `phi` down from +Y).
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
}

const EPS: f32 = 0.0001;

impl OrbitControls {
    /// Places the orbit so that the camera sits at `position` looking at `center`.
    #[must_use]
    pub fn new(settings: &OrbitSettings, position: Vec3, center: Vec3) -> Self {
        let mut controls = Self {
            rotate_speed: settings.rotate_speed,
            zoom_speed: settings.zoom_speed,
            pan_speed: settings.pan_speed,
            damping_factor: settings.damping_factor,
            enable_damping: settings.enable_damping,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            center,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            rotate_delta: Vec2::ZERO,
        };
        controls.retarget(position, center);
        controls
    }

    /// Re-derives the spherical coordinates from a camera position and pivot.
    pub fn retarget(&mut self, position: Vec3, center: Vec3) {
        let offset = position - center;
        self.center = center;
        self.radius = offset.length().clamp(self.min_distance, self.max_distance);
        if offset.length_squared() > 0.0 {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / offset.length()).clamp(-1.0, 1.0).acos();
        }
        self.phi = self.phi.clamp(EPS, PI - EPS);
        self.rotate_delta = Vec2::ZERO;
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Applies this frame's input and writes the camera transform.
    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_degrees: f32, dt: f32) {
        let screen_height = input.screen_size().y.max(1.0);
        let cursor_delta = input.cursor_delta();

        if input.is_button_pressed(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let retention = (1.0 - self.damping_factor).powf(dt * 60.0);
            let applied = self.rotate_delta * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }
        self.phi = self.phi.clamp(EPS, PI - EPS);

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let scale = 0.95_f32.powf(self.zoom_speed * scroll.abs());
            if scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.is_button_pressed(MouseButton::Right) {
            let visible_height = 2.0 * self.radius * (fov_degrees.to_radians() / 2.0).tan();
            let world_per_pixel = visible_height / screen_height;

            let forward = -self.offset();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            self.center += (right * -cursor_delta.x + up * cursor_delta.y) * world_per_pixel * self.pan_speed;
        }

        transform.position = self.center + self.offset() * self.radius;
        transform.look_at(self.center, Vec3::Y);
    }
}
