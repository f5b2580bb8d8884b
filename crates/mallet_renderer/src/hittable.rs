//! Hittable trait and HitRecord for ray-object intersection.

use mallet_math::{Ray, Vec2, Vec3};

/// Initial distance of a fresh hit record; anything nearer replaces it.
pub const T_SENTINEL: f32 = 10_000.0;

/// Index of a material in a [`MaterialLibrary`](crate::MaterialLibrary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Nearest-hit accumulator.
///
/// `t` only ever decreases during a traversal: a primitive writes into the
/// record only when its hit is strictly nearer than the current `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Ray parameter of the nearest hit so far
    pub t: f32,
    /// Surface normal at the hit
    pub normal: Vec3,
    /// 2D surface coordinates
    pub texcoord: Vec2,
    /// Material bound by the nearest enclosing `Surface`, if any
    pub material: Option<MaterialId>,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            t: T_SENTINEL,
            normal: Vec3::ZERO,
            texcoord: Vec2::ZERO,
            material: None,
        }
    }
}

impl HitRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a candidate at `t` would replace the current hit.
    #[inline]
    pub fn accepts(&self, t: f32) -> bool {
        t < self.t
    }

    /// True once anything has been recorded.
    pub fn is_hit(&self) -> bool {
        self.t < T_SENTINEL
    }

    /// Overwrite with a new geometric hit. The material binding is cleared
    /// so a stale one from a farther surface cannot leak through.
    #[inline]
    pub fn record(&mut self, t: f32, normal: Vec3, texcoord: Vec2) {
        self.t = t;
        self.normal = normal;
        self.texcoord = texcoord;
        self.material = None;
    }

    /// World-space point of the hit along `ray`.
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.t)
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Intersect `ray` with this object.
    ///
    /// With `rec == None` this is an occlusion query: return true as soon as
    /// any intersection with positive parameter exists.
    ///
    /// With a record, write into it only for a hit strictly nearer than
    /// `rec.t`, and return true exactly when that happened.
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool;

    /// Report every material bound inside this subtree.
    fn visit_materials(&self, _visit: &mut dyn FnMut(MaterialId)) {}
}

impl<H: Hittable + ?Sized> Hittable for Box<H> {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        (**self).hit(ray, rec)
    }

    fn visit_materials(&self, visit: &mut dyn FnMut(MaterialId)) {
        (**self).visit_materials(visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record() {
        let rec = HitRecord::new();
        assert_eq!(rec.t, T_SENTINEL);
        assert!(!rec.is_hit());
        assert!(rec.accepts(7.0));
        assert!(!rec.accepts(T_SENTINEL));
    }

    #[test]
    fn test_record_clears_material() {
        let mut rec = HitRecord {
            material: Some(MaterialId::new(3)),
            ..HitRecord::new()
        };
        rec.record(2.0, Vec3::Y, Vec2::ZERO);
        assert_eq!(rec.t, 2.0);
        assert!(rec.material.is_none());
        assert!(rec.is_hit());
    }
}
