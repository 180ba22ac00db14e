//! Strahl - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes built from axis-aligned rectangles,
//! boxes and spheres. Renders on a fixed pool of workers that claim image
//! rows from a shared counter, and writes the result as PPM or PNG.

mod error;
mod sampling;
mod hittable;
mod rect;
mod cuboid;
mod sphere;
mod material;
mod world;
mod camera;
mod integrator;
mod renderer;
mod output;
pub mod scene;

pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use rect::{AxisRect, Plane};
pub use cuboid::Cuboid;
pub use sphere::Sphere;
pub use material::{Color, Material, MaterialId, Materials, ScatterResult};
pub use world::World;
pub use camera::Camera;
pub use integrator::{ray_color, sky_gradient, RAY_T_MIN};
pub use renderer::{
    default_workers, render, render_pixel, render_with_rng, ImageBuffer, RenderOptions,
};
pub use output::{color_to_rgb, linear_to_gamma, save_image, to_rgb_image, write_ppm, OutputFormat};

/// Re-export Vec3 and common math types from strahl_math
pub use strahl_math::{Interval, Ray, Vec3};
