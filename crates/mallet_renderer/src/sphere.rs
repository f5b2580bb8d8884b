//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use mallet_math::{AnimatedValue, ConfigError, ConfigResult, Interval, Ray, Vec2, Vec3};
use std::f32::consts::{FRAC_2_PI, PI};

/// A sphere with a possibly moving center.
pub struct Sphere {
    center: AnimatedValue<Vec3>,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: impl Into<AnimatedValue<Vec3>>, radius: f32) -> ConfigResult<Self> {
        let radius = ConfigError::check_positive("sphere radius", radius)?;
        Ok(Self {
            center: center.into(),
            radius,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Center of the sphere at `time`.
    pub fn center(&self, time: f32) -> Vec3 {
        self.center.evaluate(time)
    }

    /// Surface coordinates from a unit normal.
    ///
    /// `v` is the polar angle over pi measured from the -Y pole; `u` is the
    /// azimuth from -Z over pi/2, mirrored on the +X hemisphere. At the poles
    /// the azimuth divides by sin(phi) = 0 and may come out NaN.
    fn texcoord(normal: Vec3) -> Vec2 {
        let cos_phi = -normal.y;
        let phi = cos_phi.clamp(-1.0, 1.0).acos();
        let sin_phi = phi.sin();

        let mut u = (-normal.z / sin_phi).clamp(-1.0, 1.0).acos() * FRAC_2_PI;
        if normal.x >= 0.0 {
            u = 1.0 - u;
        }
        Vec2::new(u, phi / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        let center = self.center(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Prefer the nearer root; fall back to the far one from inside
        let near = (h - sqrtd) / a;
        let far = (h + sqrtd) / a;
        let t = if Interval::POSITIVE.surrounds(near) {
            near
        } else if Interval::POSITIVE.surrounds(far) {
            far
        } else {
            return false;
        };

        let Some(rec) = rec else {
            return true;
        };
        if !rec.accepts(t) {
            return false;
        }

        let normal = ((ray.at(t) - center) / self.radius).normalize();
        rec.record(t, normal, Self::texcoord(normal));
        true
    }
}
