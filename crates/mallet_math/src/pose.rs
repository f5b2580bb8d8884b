//! Rigid poses used to drive transform animation.

use crate::{EulerRot, Interpolate, Mat4, Quat, Vec3};

/// A rigid placement: a rotation followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Build a pose from a position and XYZ Euler angles in radians.
    pub fn from_euler(translation: Vec3, angles: Vec3) -> Self {
        Self::new(
            translation,
            Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z),
        )
    }

    /// Local-to-parent matrix: translate * rotate.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Pose> for Mat4 {
    fn from(pose: Pose) -> Self {
        pose.to_mat4()
    }
}

impl Interpolate for Pose {
    fn interpolate(&self, other: &Self, factor: f32) -> Self {
        Pose::new(
            self.translation.lerp(other.translation, factor),
            self.rotation.slerp(other.rotation, factor),
        )
    }
}
