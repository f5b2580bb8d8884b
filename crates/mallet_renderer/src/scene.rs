//! The renderable scene: a primitive tree plus its materials.

use mallet_math::{ConfigError, ConfigResult, Ray};

use crate::{Group, HitRecord, Hittable, Material, MaterialId, MaterialLibrary};

/// Root primitive and material arena, read-only while rendering.
pub struct Scene {
    root: Box<dyn Hittable>,
    materials: MaterialLibrary,
}

impl Scene {
    /// Build a scene, checking every material binding in the tree resolves.
    pub fn new(root: impl Hittable + 'static, materials: MaterialLibrary) -> ConfigResult<Self> {
        let count = materials.len();
        let mut bindings = 0usize;
        let mut unknown = None;
        root.visit_materials(&mut |id| {
            bindings += 1;
            if id.index() >= count && unknown.is_none() {
                unknown = Some(id);
            }
        });
        if let Some(id) = unknown {
            return Err(ConfigError::UnknownMaterial {
                id: id.index(),
                count,
            });
        }

        if materials.iter().any(|m| !m.reflectivity.is_finite()) {
            return Err(ConfigError::NonFinite {
                what: "material reflectivity",
            });
        }

        log::info!(
            "Scene built: {} material bindings, {} materials",
            bindings,
            count
        );

        Ok(Self {
            root: Box::new(root),
            materials,
        })
    }

    /// A scene with nothing in it.
    pub fn empty() -> Self {
        Self {
            root: Box::new(Group::new()),
            materials: MaterialLibrary::new(),
        }
    }

    /// Intersect against the root primitive.
    pub fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        self.root.hit(ray, rec)
    }

    /// True if anything lies along `ray` at a positive parameter.
    pub fn occluded(&self, ray: &Ray) -> bool {
        self.root.hit(ray, None)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Sphere, Surface};
    use mallet_math::Vec3;

    #[test]
    fn test_unknown_material_rejected() {
        let mut materials = MaterialLibrary::new();
        materials.add(Material::diffuse(Color::ONE));
        let root = Surface::new(Sphere::new(Vec3::ZERO, 1.0).unwrap(), MaterialId::new(3));

        let err = Scene::new(root, materials).err();
        assert_eq!(err, Some(ConfigError::UnknownMaterial { id: 3, count: 1 }));
    }

    #[test]
    fn test_non_finite_reflectivity_rejected() {
        let mut materials = MaterialLibrary::new();
        let id = materials.add(Material::glossy(Color::ONE, f32::NAN));
        let root = Surface::new(Sphere::new(Vec3::ZERO, 1.0).unwrap(), id);
        assert!(Scene::new(root, materials).is_err());
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::empty();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y, 0.0);
        assert!(!scene.hit(&ray, Some(&mut HitRecord::new())));
        assert!(!scene.occluded(&ray));
    }

    #[test]
    fn test_material_lookup() {
        let mut materials = MaterialLibrary::new();
        let id = materials.add(Material::glossy(Color::ONE, 0.25));
        let scene = Scene::new(Surface::new(Sphere::new(Vec3::ZERO, 1.0).unwrap(), id), materials).unwrap();

        let mut rec = HitRecord::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 0.0);
        assert!(scene.hit(&ray, Some(&mut rec)));
        let material = rec.material.and_then(|id| scene.material(id));
        assert_eq!(material.map(|m| m.reflectivity), Some(0.25));
    }
}
