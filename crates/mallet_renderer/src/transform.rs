//! Animated affine transform node.

use crate::hittable::{HitRecord, Hittable, MaterialId};
use mallet_math::{AnimatedValue, Mat4, Ray};

/// Places a child primitive with a time-varying local-to-parent matrix.
///
/// Rays are mapped into the child's frame with the inverse matrix. The
/// direction is not renormalized, so the child's `t` is valid along the
/// original ray unchanged. Normals are mapped back with the inverse
/// transpose so scaled children still shade correctly.
pub struct Transform {
    transform: AnimatedValue<Mat4>,
    child: Box<dyn Hittable>,
}

impl Transform {
    pub fn new(transform: impl Into<AnimatedValue<Mat4>>, child: impl Hittable + 'static) -> Self {
        Self {
            transform: transform.into(),
            child: Box::new(child),
        }
    }

    /// Local-to-parent matrix at `time`.
    pub fn matrix(&self, time: f32) -> Mat4 {
        self.transform.evaluate(time)
    }
}

impl Hittable for Transform {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        let inverse = self.matrix(ray.time()).inverse();
        let local = ray.transformed(&inverse);

        let Some(rec) = rec else {
            return self.child.hit(&local, None);
        };
        if !self.child.hit(&local, Some(&mut *rec)) {
            return false;
        }

        rec.normal = inverse
            .transpose()
            .transform_vector3(rec.normal)
            .normalize();
        true
    }

    fn visit_materials(&self, visit: &mut dyn FnMut(MaterialId)) {
        self.child.visit_materials(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cylinder, Sphere};
    use mallet_math::{Key, KeyframeCurve, Quat, Vec3};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_translated_sphere() {
        let node = Transform::new(
            Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)),
            Sphere::new(Vec3::ZERO, 1.0).unwrap(),
        );
        let ray = Ray::new(Vec3::new(3.0, 0.0, -8.0), Vec3::Z, 0.0);
        let mut rec = HitRecord::new();

        assert!(node.hit(&ray, Some(&mut rec)));
        assert!((rec.t - 7.0).abs() < 1e-4);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_t_is_frame_invariant_under_scale() {
        let node = Transform::new(
            Mat4::from_scale(Vec3::splat(2.0)),
            Sphere::new(Vec3::ZERO, 1.0).unwrap(),
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, -8.0), Vec3::Z, 0.0);
        let mut rec = HitRecord::new();

        assert!(node.hit(&ray, Some(&mut rec)));
        // World-space sphere has radius 2
        assert!((rec.t - 6.0).abs() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotated_cylinder_normal() {
        // Lay the cylinder along +X
        let node = Transform::new(
            Mat4::from_quat(Quat::from_rotation_z(-FRAC_PI_2)),
            Cylinder::new(0.5, 4.0).unwrap(),
        );
        let ray = Ray::new(Vec3::new(2.0, 5.0, 0.0), Vec3::NEG_Y, 0.0);
        let mut rec = HitRecord::new();

        assert!(node.hit(&ray, Some(&mut rec)));
        assert!((rec.t - 4.5).abs() < 1e-4);
        assert!((rec.normal - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_farther_hit_leaves_record() {
        let node = Transform::new(
            Mat4::from_quat(Quat::from_rotation_z(-FRAC_PI_2)),
            Cylinder::new(0.5, 4.0).unwrap(),
        );
        let ray = Ray::new(Vec3::new(2.0, 5.0, 0.0), Vec3::NEG_Y, 0.0);
        let mut rec = HitRecord::new();
        rec.t = 1.0;
        rec.normal = Vec3::Z;

        // The normal is only remapped when the child actually updated
        assert!(!node.hit(&ray, Some(&mut rec)));
        assert_eq!(rec.t, 1.0);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_keyframed_motion() {
        let track = KeyframeCurve::new(vec![
            Key::linear(0.0, Mat4::IDENTITY),
            Key::linear(1.0, Mat4::from_translation(Vec3::new(0.0, 10.0, 0.0))),
        ])
        .unwrap();
        let node = Transform::new(
            AnimatedValue::keyframes(track),
            Sphere::new(Vec3::ZERO, 1.0).unwrap(),
        );

        let probe = |time: f32| Ray::new(Vec3::new(0.0, 5.0, -8.0), Vec3::Z, time);
        assert!(!node.hit(&probe(0.0), None));
        assert!(node.hit(&probe(0.5), None));
    }
}
