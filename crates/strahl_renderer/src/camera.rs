//! Camera for ray generation.

use rand::RngCore;
use serde::Deserialize;
use strahl_math::Vec3;

use crate::sampling::{random_in_unit_disk, sample_square};
use crate::{Ray, RenderError, RenderResult};

/// Camera for generating rays into the scene.
///
/// The public fields are the configuration. They are read by
/// [`Camera::initialize`], which derives the viewport and lens state used by
/// [`Camera::get_ray`]; changing them afterwards has no effect until the
/// next `initialize`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Camera {
    // Image settings
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples taken for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of bounces for a single path
    pub max_depth: u32,

    // Lens settings
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f32,

    // Camera positioning
    #[serde(alias = "lookfrom")]
    pub look_from: Vec3,
    #[serde(alias = "lookat")]
    pub look_at: Vec3,
    pub vup: Vec3,

    // Cached computed values (set by initialize())
    #[serde(skip)]
    image_height: u32,
    #[serde(skip)]
    samples_scale: f32,
    #[serde(skip)]
    center: Vec3,
    #[serde(skip)]
    pixel00_loc: Vec3,
    #[serde(skip)]
    pixel_delta_u: Vec3,
    #[serde(skip)]
    pixel_delta_v: Vec3,
    #[serde(skip)]
    u: Vec3,
    #[serde(skip)]
    v: Vec3,
    #[serde(skip)]
    w: Vec3,
    #[serde(skip)]
    defocus_disk_u: Vec3,
    #[serde(skip)]
    defocus_disk_v: Vec3,
    #[serde(skip)]
    initialized: bool,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 1280,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            // Cached values (initialized to defaults)
            image_height: 1280,
            samples_scale: 0.1,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            initialized: false,
        }
    }

    /// Set image width and aspect ratio; the height is derived.
    pub fn with_image(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    ///
    /// Fails on configurations that cannot produce an image: zero width or
    /// samples, a non-positive aspect ratio or focus distance, a field of
    /// view outside (0, 180) degrees, or a degenerate view basis.
    pub fn initialize(&mut self) -> RenderResult<()> {
        self.initialized = false;
        self.validate()?;

        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edge vectors: across the top, and down the left side
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;

        log::debug!(
            "Camera initialized: {}x{}, viewport {:.3}x{:.3}, defocus radius {:.4}",
            self.image_width,
            self.image_height,
            viewport_width,
            viewport_height,
            defocus_radius
        );

        Ok(())
    }

    fn validate(&self) -> RenderResult<()> {
        let invalid = |msg: String| -> RenderResult<()> { Err(RenderError::InvalidConfig(msg)) };

        if self.image_width == 0 {
            return invalid("image_width must be at least 1".into());
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be at least 1".into());
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid(format!("aspect_ratio must be positive, got {}", self.aspect_ratio));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return invalid(format!("focus_dist must be positive, got {}", self.focus_dist));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid(format!("vfov must be in (0, 180) degrees, got {}", self.vfov));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 || !view.is_finite() {
            return invalid("look_from and look_at must be distinct points".into());
        }
        if self.vup.cross(view).length_squared() == 0.0 {
            return invalid("vup must not be parallel to the view direction".into());
        }

        Ok(())
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray starts at the camera center, or on the defocus disk when the
    /// defocus angle is positive, and points at a jittered location inside
    /// the pixel on the focus plane.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Derived image height (valid after initialize()).
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn pixel00_loc(&self) -> Vec3 {
        self.pixel00_loc
    }

    /// Per-pixel step vectors (right, down).
    pub fn pixel_deltas(&self) -> (Vec3, Vec3) {
        (self.pixel_delta_u, self.pixel_delta_v)
    }

    /// Orthonormal camera frame (u = right, v = up, w = backwards).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Defocus disk radius vectors.
    pub fn defocus_disk(&self) -> (Vec3, Vec3) {
        (self.defocus_disk_u, self.defocus_disk_v)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
