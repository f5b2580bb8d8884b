//! Flat disk primitive.

use crate::hittable::{HitRecord, Hittable};
use mallet_math::{ConfigError, ConfigResult, Interval, Ray, Vec2, Vec3};

/// Rays this close to parallel with the disk plane are treated as misses.
const PLANE_PARALLEL_EPSILON: f32 = 1e-6;

/// A disk: plane intersection clipped to a radius, hit from either side.
#[derive(Debug, Clone, Copy)]
pub struct Disk {
    center: Vec3,
    radius: f32,
    normal: Vec3,
}

impl Disk {
    /// Create a disk. `normal` is normalized and must be non-zero.
    pub fn new(center: Vec3, radius: f32, normal: Vec3) -> ConfigResult<Self> {
        let radius = ConfigError::check_positive("disk radius", radius)?;
        let normal = normal
            .try_normalize()
            .ok_or_else(|| ConfigError::Invalid("disk normal must be non-zero".to_string()))?;
        Ok(Self {
            center,
            radius,
            normal,
        })
    }

    /// A disk facing +Y.
    pub fn horizontal(center: Vec3, radius: f32) -> ConfigResult<Self> {
        Self::new(center, radius, Vec3::Y)
    }
}

impl Hittable for Disk {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() <= PLANE_PARALLEL_EPSILON {
            return false;
        }

        let t = (self.center - ray.origin()).dot(self.normal) / denom;
        if !Interval::POSITIVE.surrounds(t) {
            return false;
        }
        let offset = ray.at(t) - self.center;
        if offset.length_squared() > self.radius * self.radius {
            return false;
        }

        let Some(rec) = rec else {
            return true;
        };
        if !rec.accepts(t) {
            return false;
        }

        let tangent = offset.cross(self.normal);
        rec.record(t, self.normal, Vec2::new(tangent.x, tangent.z));
        true
    }
}
