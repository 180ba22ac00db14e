//! Light transport: the color carried back along a camera ray.

use rand::RngCore;
use strahl_math::Interval;

use crate::{Color, HitRecord, Hittable, Ray, World};

/// Near bound of every intersection query; keeps a scattered ray from
/// re-hitting the surface it left.
pub const RAY_T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// Follows the path for at most `depth` bounces, multiplying the
/// attenuation of every surface it scatters off. A path that escapes picks
/// up the sky gradient; one that is absorbed or runs out of bounces
/// contributes black. The loop is equivalent to recursing on the scattered
/// ray with `depth - 1`.
pub fn ray_color(ray: &Ray, world: &World, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let mut rec = HitRecord::default();

        if !world.hit(&ray, Interval::new(RAY_T_MIN, f32::INFINITY), &mut rec) {
            return throughput * sky_gradient(&ray);
        }

        match world.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Bounce budget exhausted
    Color::ZERO
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisRect, Cuboid, Material, MaterialId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strahl_math::Vec3;

    fn close(a: Color, b: Color) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)));

        assert!(close(up, Color::new(0.5, 0.7, 1.0)));
        assert!(close(down, Color::ONE));
        assert!(close(level, Color::new(0.75, 0.85, 1.0)));
    }

    #[test]
    fn test_depth_zero_is_black() {
        let mut world = World::new();
        let gray = world.add_material(Material::lambertian(Color::splat(0.5)));
        world.push(Cuboid::new(Vec3::splat(-1.0), Vec3::ONE, gray));
        let mut rng = StdRng::seed_from_u64(1);

        for ray in [
            Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z),
            Ray::new(Vec3::ZERO, Vec3::Y),
            Ray::new(Vec3::new(9.0, 9.0, 9.0), Vec3::X),
        ] {
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
        }
        assert_eq!(ray_color(&Ray::default(), &World::new(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_gradient() {
        let world = World::new();
        let mut rng = StdRng::seed_from_u64(1);

        let direction = Vec3::new(1.0, 0.5, -2.0);
        let a = 0.5 * (direction.normalize().y + 1.0);
        let expected = (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0);

        let color = ray_color(&Ray::new(Vec3::ZERO, direction), &world, 10, &mut rng);
        assert!(close(color, expected));
    }

    #[test]
    fn test_mirror_bounce_attenuates_sky() {
        // Floor mirror under a camera looking down: one bounce, then sky
        let mut world = World::new();
        let mirror = world.add_material(Material::metal(Color::new(0.5, 0.25, 1.0), 0.0));
        world.push(AxisRect::xz(-10.0, 10.0, -10.0, 10.0, 0.0, mirror));
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let color = ray_color(&ray, &world, 5, &mut rng);
        let sky_up = Color::new(0.5, 0.7, 1.0);
        assert!(close(color, Color::new(0.5, 0.25, 1.0) * sky_up));

        // Only one bounce allowed: the reflected ray gets no budget left
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_back_face_reflects() {
        let mut world = World::new();
        let mirror = world.add_material(Material::metal(Color::ONE, 0.0));
        world.push(AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 1.0, mirror));
        let mut rng = StdRng::seed_from_u64(1);

        // Normal flips to face the ray, so the mirror reflects straight back down
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let color = ray_color(&ray, &world, 5, &mut rng);
        assert!(close(color, sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y))));
    }

    #[test]
    fn test_absorbed_is_black() {
        let mut world = World::new();
        // Handle with no material behind it absorbs everything
        world.push(AxisRect::xy(-1.0, 1.0, -1.0, 1.0, -1.0, MaterialId::new(7)));
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &world, 5, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_closed_box_traps_light() {
        // Camera inside a closed mirror box: the path never escapes
        let mut world = World::new();
        let mirror = world.add_material(Material::metal(Color::ONE, 0.0));
        world.push(Cuboid::new(Vec3::splat(-1.0), Vec3::ONE, mirror));
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, -1.0));
        assert_eq!(ray_color(&ray, &world, 20, &mut rng), Color::ZERO);
    }
}
