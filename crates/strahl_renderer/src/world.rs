//! The renderable world: geometry plus the materials it references.

use std::sync::Arc;

use rand::RngCore;

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::{Material, MaterialId, Materials, ScatterResult};
use crate::Ray;
use strahl_math::Interval;

/// Geometry aggregate and material arena rendered together.
#[derive(Clone, Default)]
pub struct World {
    objects: HittableList,
    materials: Materials,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and get the handle geometry should store.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.add(material)
    }

    /// Add a shared object.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.add(object);
    }

    /// Wrap an owned object and add it.
    pub fn push<H: Hittable + 'static>(&mut self, object: H) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &HittableList {
        &self.objects
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Scatter off the material recorded in `rec`.
    ///
    /// A handle that does not belong to this world's arena absorbs the ray.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        self.materials
            .get(rec.material)
            .and_then(|material| material.scatter(ray_in, rec, rng))
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        self.objects.hit(ray, ray_t, rec)
    }
}
