//! Axis-aligned rectangle primitive.
//!
//! A rectangle lies in one of the three coordinate planes at a fixed
//! offset `k` along the perpendicular axis and is bounded by two closed
//! ranges on the in-plane axes.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use strahl_math::{Interval, Vec3};

/// Orientation of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Spans X and Y, perpendicular to Z.
    Xy,
    /// Spans X and Z, perpendicular to Y.
    Xz,
    /// Spans Y and Z, perpendicular to X.
    Yz,
}

impl Plane {
    /// Axis indices `(a, b, perpendicular)`.
    #[inline]
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// Unit normal pointing along the positive perpendicular axis.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => Vec3::X,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy)]
pub struct AxisRect {
    plane: Plane,
    /// Bounds on the first in-plane axis
    a: Interval,
    /// Bounds on the second in-plane axis
    b: Interval,
    /// Offset along the perpendicular axis
    k: f32,
    /// Outward side is the negative perpendicular axis
    flipped: bool,
    material: MaterialId,
}

impl AxisRect {
    /// Create a rectangle in `plane` spanning `[a0, a1] x [b0, b1]` at offset `k`.
    ///
    /// The outward side faces the positive perpendicular axis.
    pub fn new(
        plane: Plane,
        a0: f32,
        a1: f32,
        b0: f32,
        b1: f32,
        k: f32,
        material: MaterialId,
    ) -> Self {
        Self {
            plane,
            a: Interval::new(a0, a1),
            b: Interval::new(b0, b1),
            k,
            flipped: false,
            material,
        }
    }

    /// Same rectangle with its outward side facing the negative axis.
    ///
    /// Only changes which side counts as the front face; the stored hit
    /// normal always faces the ray either way.
    pub fn flipped(mut self) -> Self {
        self.flipped = !self.flipped;
        self
    }

    /// Rectangle in the XY plane at z = k.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(Plane::Xy, x0, x1, y0, y1, k, material)
    }

    /// Rectangle in the XZ plane at y = k.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(Plane::Xz, x0, x1, z0, z1, k, material)
    }

    /// Rectangle in the YZ plane at x = k.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(Plane::Yz, y0, y1, z0, z1, k, material)
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn k(&self) -> f32 {
        self.k
    }

    /// Outward unit normal.
    pub fn outward_normal(&self) -> Vec3 {
        if self.flipped {
            -self.plane.normal()
        } else {
            self.plane.normal()
        }
    }

    /// In-plane bounds, in the order given by [`Plane::axes`].
    pub fn bounds(&self) -> (Interval, Interval) {
        (self.a, self.b)
    }
}

impl Hittable for AxisRect {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let (a_axis, b_axis, n_axis) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // A ray parallel to the plane gives +/-inf or NaN here
        let t = (self.k - origin[n_axis]) / direction[n_axis];
        if !t.is_finite() || !ray_t.contains(t) {
            return false;
        }

        let a = origin[a_axis] + t * direction[a_axis];
        let b = origin[b_axis] + t * direction[b_axis];
        if !self.a.contains(a) || !self.b.contains(b) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.material = self.material;
        rec.set_face_normal(ray, self.outward_normal());

        true
    }
}
