use glam::{Quat, Vec3, Vec4};

/// Upper bound on morph target weights carried by a single keyframe.
pub const MAX_MORPH_TARGETS: usize = 8;

/// Values that a [`KeyframeTrack`](super::tracks::KeyframeTrack) can blend.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Cubic Hermite spline between `v0` and `v1`.
    ///
    /// Tangents are given per second and scaled by the keyframe spacing `dt`
    /// (glTF `CUBICSPLINE` convention).
    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self;
}

/// Hermite basis weights for `(v0, m0, v1, m1)`.
#[inline]
fn hermite_basis(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    [1.0 - s2, s3 - t2 + t, s2, s3]
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MorphWeightData {
    pub weights: [f32; MAX_MORPH_TARGETS],
}

impl MorphWeightData {
    /// Packs up to [`MAX_MORPH_TARGETS`] weights; extra weights are dropped.
    #[must_use]
    pub fn from_slice(values: &[f32]) -> Self {
        let mut data = Self::default();
        let count = values.len().min(MAX_MORPH_TARGETS);
        data.weights[..count].copy_from_slice(&values[..count]);
        data
    }
}

impl Interpolatable for MorphWeightData {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        let mut result = Self::default();
        for (i, w) in result.weights.iter_mut().enumerate() {
            *w = f32::interpolate_linear(start.weights[i], end.weights[i], t);
        }
        result
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let mut result = Self::default();
        for (i, w) in result.weights.iter_mut().enumerate() {
            *w = f32::interpolate_cubic(
                v0.weights[i],
                out_tangent0.weights[i],
                in_tangent1.weights[i],
                v1.weights[i],
                t,
                dt,
            );
        }
        result
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let [s0, s1, s2, s3] = hermite_basis(t);
        s0 * v0 + s1 * out_tangent0 * dt + s2 * v1 + s3 * in_tangent1 * dt
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let [s0, s1, s2, s3] = hermite_basis(t);
        v0 * s0 + out_tangent0 * (dt * s1) + v1 * s2 + in_tangent1 * (dt * s3)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let [s0, s1, s2, s3] = hermite_basis(t);
        let blended = Vec4::from(v0) * s0
            + Vec4::from(out_tangent0) * (dt * s1)
            + Vec4::from(v1) * s2
            + Vec4::from(in_tangent1) * (dt * s3);
        Quat::from_vec4(blended).normalize()
    }
}
