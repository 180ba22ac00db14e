//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::{MaterialId, Ray};
use strahl_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (unit length, always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: MaterialId,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// `outward_normal` must be unit length. The stored normal always
    /// points against the ray, so `front_face` tracks which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;
}

/// A list of hittable objects.
///
/// Members are shared, so the same object can sit in several lists.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add a shared object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Wrap an owned object and add it.
    pub fn push<H: Hittable + 'static>(&mut self, object: H) {
        self.add(Arc::new(object));
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, ray_t.with_max(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AxisRect;

    fn search() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_set_face_normal_front() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, Vec3::Z);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_set_face_normal_back() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, Vec3::Z);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(list.is_empty());
        assert!(!list.hit(&ray, search(), &mut rec));
    }

    #[test]
    fn test_nearest_hit_wins() {
        let near = MaterialId::new(1);
        let far = MaterialId::new(2);

        // Two overlapping rectangles at different depths, far one added first
        let mut list = HittableList::new();
        list.push(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -5.0, far));
        list.push(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -2.0, near));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(list.hit(&ray, search(), &mut rec));
        assert_eq!(rec.material, near);
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_insertion_order_independent() {
        let rects = [
            AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -3.0, MaterialId::new(0)),
            AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -6.0, MaterialId::new(1)),
            AxisRect::xz(-1.0, 1.0, -9.0, 9.0, -4.0, MaterialId::new(2)),
        ];

        let mut forward = HittableList::new();
        let mut backward = HittableList::new();
        for rect in rects.iter() {
            forward.push(*rect);
        }
        for rect in rects.iter().rev() {
            backward.push(*rect);
        }

        let rays = [
            Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::new(0.0, -1.0, -1.0)),
            Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z),
            Ray::new(Vec3::ZERO, Vec3::Y),
        ];

        for ray in &rays {
            let mut a = HitRecord::default();
            let mut b = HitRecord::default();
            let hit_a = forward.hit(ray, search(), &mut a);
            let hit_b = backward.hit(ray, search(), &mut b);

            assert_eq!(hit_a, hit_b);
            if hit_a {
                assert_eq!(a.t, b.t);
                assert_eq!(a.material, b.material);
                assert_eq!(a.normal, b.normal);
            }
        }
    }

    #[test]
    fn test_shared_member() {
        let rect: Arc<dyn Hittable> =
            Arc::new(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -1.0, MaterialId::new(0)));

        let mut a = HittableList::new();
        let mut b = HittableList::new();
        a.add(Arc::clone(&rect));
        b.add(rect);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }
}
