//! Axis-aligned box built from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    AxisRect, MaterialId, Ray,
};
use strahl_math::{Interval, Vec3};

/// An axis-aligned box.
///
/// Every face is an [`AxisRect`] sharing the box's material and facing out
/// of the box, and a hit query is answered by the nearest face.
#[derive(Clone)]
pub struct Cuboid {
    min: Vec3,
    max: Vec3,
    sides: HittableList,
}

impl Cuboid {
    /// Create a box from two opposite corners.
    ///
    /// The corners may be given in any order.
    pub fn new(p0: Vec3, p1: Vec3, material: MaterialId) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let mut sides = HittableList::new();
        // front / back
        sides.push(AxisRect::xy(min.x, max.x, min.y, max.y, max.z, material));
        sides.push(AxisRect::xy(min.x, max.x, min.y, max.y, min.z, material).flipped());
        // top / bottom
        sides.push(AxisRect::xz(min.x, max.x, min.z, max.z, max.y, material));
        sides.push(AxisRect::xz(min.x, max.x, min.z, max.z, min.y, material).flipped());
        // right / left
        sides.push(AxisRect::yz(min.y, max.y, min.z, max.z, max.x, material));
        sides.push(AxisRect::yz(min.y, max.y, min.z, max.z, min.x, material).flipped());

        Self { min, max, sides }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// The six faces.
    pub fn sides(&self) -> &HittableList {
        &self.sides
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }
}
