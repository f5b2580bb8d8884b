//! Materials and the material arena.

use mallet_math::{Vec2, Vec3};

use crate::{MaterialId, Texture};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Surface appearance: a texture for the diffuse term plus a mirror weight.
///
/// `reflectivity` is not clamped; values above 1 add energy.
#[derive(Clone, Debug)]
pub struct Material {
    pub texture: Texture,
    pub reflectivity: f32,
}

impl Material {
    pub fn new(texture: Texture, reflectivity: f32) -> Self {
        Self {
            texture,
            reflectivity,
        }
    }

    /// Purely diffuse, single color.
    pub fn diffuse(color: Color) -> Self {
        Self::new(Texture::Solid(color), 0.0)
    }

    /// Single color with a mirror component.
    pub fn glossy(color: Color, reflectivity: f32) -> Self {
        Self::new(Texture::Solid(color), reflectivity)
    }

    /// Diffuse color at `texcoord`.
    pub fn albedo(&self, texcoord: Vec2) -> Color {
        self.texture.sample(texcoord)
    }
}

/// Owns every material of a scene; primitives refer to them by index.
#[derive(Clone, Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId::new(self.materials.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
