//! Axis-aligned box primitive.

use crate::hittable::{HitRecord, Hittable};
use mallet_math::{ConfigError, ConfigResult, Ray, Vec2, Vec3};

const AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

/// A box between two corners, intersected with the slab method.
#[derive(Debug, Clone, Copy)]
pub struct AxisBox {
    min: Vec3,
    max: Vec3,
}

impl AxisBox {
    /// Create a box from its min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> ConfigResult<Self> {
        let size = max - min;
        for value in size.to_array() {
            ConfigError::check_positive("box extent", value)?;
        }
        Ok(Self { min, max })
    }

    /// Create a box from its center and half-extent.
    pub fn from_center(center: Vec3, half_extent: Vec3) -> ConfigResult<Self> {
        Self::new(center - half_extent, center + half_extent)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Face normal: the axis whose half-extent the hit point is closest to,
    /// signed by which side of the center it lies on.
    fn face_normal(&self, local: Vec3) -> Vec3 {
        let half = self.max - self.center();
        let mut normal = Vec3::ZERO;
        let mut closest = f32::MAX;
        for (axis, dir) in AXES.iter().enumerate() {
            let dist = (half[axis] - local[axis].abs()).abs();
            if dist < closest {
                closest = dist;
                normal = *dir * local[axis].signum();
            }
        }
        normal
    }
}

impl Hittable for AxisBox {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        let inv_dir = ray.direction().recip();
        let t1 = (self.min - ray.origin()) * inv_dir;
        let t2 = (self.max - ray.origin()) * inv_dir;

        let entry = t1.min(t2).max_element();
        let exit = t1.max(t2).min_element();

        if exit < entry || exit < 0.0 {
            return false;
        }
        // From inside the box the exit face is the visible one
        let t = if entry > 0.0 { entry } else { exit };

        let Some(rec) = rec else {
            return true;
        };
        if !rec.accepts(t) {
            return false;
        }

        let local = ray.at(t) - self.center();
        let normal = self.face_normal(local);
        let tangent = local.cross(normal);
        rec.record(t, normal, Vec2::new(tangent.x, tangent.z));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AxisBox {
        AxisBox::from_center(Vec3::ZERO, Vec3::ONE).unwrap()
    }

    #[test]
    fn test_box_hit_front_face() {
        let ray = Ray::new(Vec3::new(0.2, 0.3, -5.0), Vec3::Z, 0.0);
        let mut rec = HitRecord::new();

        assert!(unit_box().hit(&ray, Some(&mut rec)));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_box_side_normals() {
        let cases = [
            (Vec3::new(5.0, 0.1, 0.2), Vec3::NEG_X, Vec3::X),
            (Vec3::new(0.1, -5.0, 0.2), Vec3::Y, Vec3::NEG_Y),
            (Vec3::new(-0.3, 5.0, 0.2), Vec3::NEG_Y, Vec3::Y),
        ];
        for (origin, direction, expected) in cases {
            let ray = Ray::new(origin, direction, 0.0);
            let mut rec = HitRecord::new();
            assert!(unit_box().hit(&ray, Some(&mut rec)));
            assert_eq!(rec.normal, expected);
        }
    }

    #[test]
    fn test_box_miss_and_behind() {
        let miss = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::Z, 0.0);
        assert!(!unit_box().hit(&miss, None));

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, 0.0);
        assert!(!unit_box().hit(&behind, None));
    }

    #[test]
    fn test_box_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);
        let mut rec = HitRecord::new();
        assert!(unit_box().hit(&ray, Some(&mut rec)));
        assert!((rec.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_farther_hit_leaves_record() {
        let ray = Ray::new(Vec3::new(0.2, 0.3, -5.0), Vec3::Z, 0.0);
        let mut rec = HitRecord::new();
        rec.t = 2.0;
        rec.normal = Vec3::X;

        assert!(!unit_box().hit(&ray, Some(&mut rec)));
        assert_eq!(rec.t, 2.0);
        assert_eq!(rec.normal, Vec3::X);
        assert!(unit_box().hit(&ray, None));
    }

    #[test]
    fn test_degenerate_box_rejected() {
        assert!(AxisBox::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)).is_err());
        assert!(AxisBox::new(Vec3::ONE, Vec3::ZERO).is_err());
    }
}
