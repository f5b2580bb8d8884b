//! Blending between two animation values.

use crate::{Mat4, Quat, Vec2, Vec3};

/// Values that a keyframe curve can blend between.
///
/// `factor` is usually in [0, 1] but shaped interpolation modes can push it
/// outside that range, in which case implementations extrapolate.
pub trait Interpolate: Clone + Send + Sync + 'static {
    fn interpolate(&self, other: &Self, factor: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        self + (other - self) * factor
    }
}

impl Interpolate for Vec2 {
    #[inline]
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        self.lerp(*other, factor)
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        self.lerp(*other, factor)
    }
}

impl Interpolate for Quat {
    /// Shortest-path spherical blend.
    #[inline]
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        self.slerp(*other, factor)
    }
}

impl Interpolate for Mat4 {
    /// Decompose both matrices, blend scale and translation linearly and the
    /// rotation spherically, then recompose.
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        let (sa, ra, ta) = self.to_scale_rotation_translation();
        let (sb, rb, tb) = other.to_scale_rotation_translation();
        Mat4::from_scale_rotation_translation(
            sa.lerp(sb, factor),
            ra.slerp(rb, factor),
            ta.lerp(tb, factor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_scalar_midpoint() {
        assert!((2.0f32.interpolate(&4.0, 0.5) - 3.0).abs() < 1e-6);
        assert!((2.0f32.interpolate(&4.0, 1.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_quat_takes_shortest_path() {
        let a = Quat::from_rotation_y(0.0);
        let b = Quat::from_rotation_y(FRAC_PI_2);
        let mid = a.interpolate(&b, 0.5);
        let expected = Quat::from_rotation_y(FRAC_PI_2 / 2.0);
        assert!(mid.dot(expected).abs() > 0.9999);
    }

    #[test]
    fn test_mat4_blend_translation() {
        let a = Mat4::from_translation(Vec3::ZERO);
        let b = Mat4::from_translation(Vec3::new(2.0, 0.0, -4.0));
        let mid = a.interpolate(&b, 0.5);
        let p = mid.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5);
    }
}
