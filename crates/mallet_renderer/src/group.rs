//! Nearest-hit union of child primitives.

use crate::hittable::{HitRecord, Hittable, MaterialId};
use mallet_math::Ray;

/// An ordered collection of primitives.
///
/// Equal-distance hits resolve to the child that comes first.
#[derive(Default)]
pub struct Group {
    children: Vec<Box<dyn Hittable>>,
}

impl Group {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_children(children: Vec<Box<dyn Hittable>>) -> Self {
        Self { children }
    }

    /// Add a child primitive.
    pub fn add(&mut self, child: impl Hittable + 'static) {
        self.children.push(Box::new(child));
    }

    /// Builder form of [`Group::add`].
    pub fn with(mut self, child: impl Hittable + 'static) -> Self {
        self.add(child);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Hittable for Group {
    fn hit(&self, ray: &Ray, rec: Option<&mut HitRecord>) -> bool {
        let Some(rec) = rec else {
            return self.children.iter().any(|child| child.hit(ray, None));
        };

        let mut nearest = HitRecord::new();
        for child in &self.children {
            child.hit(ray, Some(&mut nearest));
        }

        if nearest.is_hit() && rec.accepts(nearest.t) {
            *rec = nearest;
            return true;
        }
        false
    }

    fn visit_materials(&self, visit: &mut dyn FnMut(MaterialId)) {
        for child in &self.children {
            child.visit_materials(visit);
        }
    }
}
