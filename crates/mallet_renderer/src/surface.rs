//! Binds geometry to a material.

use crate::hittable::{HitRecord, Hittable, MaterialId};
use mallet_math::Ray;

/// A leaf of the scene: any primitive plus the material it is shaded with.
pub struct Surface {
    shape: Box<dyn Hittable>,
    material: MaterialId,
}

impl Surface {
    pub fn new(shape: impl Hittable + 'static, material: MaterialId) -> Self {
        Self {
            shape: Box::new(shape),
            material,
        }
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Hittable for Surface {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        match rec {
            None => self.shape.hit(ray, None),
            Some(rec) => {
                if !self.shape.hit(ray, Some(&mut *rec)) {
                    return false;
                }
                // A fresh geometric hit arrives unbound; an inner Surface
                // that already bound it takes precedence
                if rec.material.is_none() {
                    rec.material = Some(self.material);
                }
                true
            }
        }
    }

    fn visit_materials(&self, visit: &mut dyn FnMut(MaterialId)) {
        visit(self.material);
        self.shape.visit_materials(visit);
    }
}
