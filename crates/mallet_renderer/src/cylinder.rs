//! Open cylinder along the local Y axis.

use crate::hittable::{HitRecord, Hittable};
use mallet_math::{ConfigError, ConfigResult, Interval, Ray, Vec2, Vec3};

/// Rays closer than this to parallel with the axis never hit the wall.
const AXIS_PARALLEL_EPSILON: f32 = 1e-12;

/// A cylinder wall of `radius` spanning y in [0, height].
///
/// Placement and orientation come from an enclosing `Transform`.
#[derive(Debug, Clone, Copy)]
pub struct Cylinder {
    radius: f32,
    height: f32,
}

impl Cylinder {
    pub fn new(radius: f32, height: f32) -> ConfigResult<Self> {
        Ok(Self {
            radius: ConfigError::check_positive("cylinder radius", radius)?,
            height: ConfigError::check_positive("cylinder height", height)?,
        })
    }
}

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        // (ox + dx*t)^2 + (oz + dz*t)^2 = r^2, ignoring y
        let o = ray.origin();
        let d = ray.direction();
        let a = d.x * d.x + d.z * d.z;
        if a < AXIS_PARALLEL_EPSILON {
            return false;
        }
        let h = o.x * d.x + o.z * d.z;
        let c = o.x * o.x + o.z * o.z - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }
        let sqrtd = discriminant.sqrt();

        let span = Interval::new(0.0, self.height);
        for t in [(-h - sqrtd) / a, (-h + sqrtd) / a] {
            if !Interval::POSITIVE.surrounds(t) {
                continue;
            }
            let p = ray.at(t);
            if !span.contains(p.y) {
                continue;
            }

            let Some(rec) = rec else {
                return true;
            };
            // The far root is only ever farther
            if !rec.accepts(t) {
                return false;
            }
            let normal = Vec3::new(p.x, 0.0, p.z).normalize();
            rec.record(t, normal, Vec2::new(p.z.atan2(p.x), p.y));
            return true;
        }
        false
    }
}
