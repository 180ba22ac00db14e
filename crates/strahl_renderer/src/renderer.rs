//! Parallel render loop.
//!
//! Renders the image one row at a time on a fixed pool of workers:
//! - Rows are claimed dynamically from a shared atomic counter
//! - The claiming worker seeds its own generator for each row from the
//!   base seed and the row index, so the image does not depend on which
//!   worker rendered which row
//! - Each row of the pixel buffer is written by exactly one worker
//! - Progress is logged from a completed-row counter

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::integrator::ray_color;
use crate::{Camera, Color, RenderResult, World};

/// Render options that do not affect the image itself.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Worker count; `None` uses the available hardware parallelism
    pub workers: Option<usize>,
    /// Base seed for the per-row generators; `None` draws one from the OS
    pub seed: Option<u64>,
}

/// Row-major buffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Number of workers used when none is requested.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    // Average the samples
    pixel_color * camera.samples_scale()
}

/// Render row `j` into `row`.
fn render_row(camera: &Camera, world: &World, j: u32, row: &mut [Color], rng: &mut dyn RngCore) {
    for (i, pixel) in row.iter_mut().enumerate() {
        *pixel = render_pixel(camera, world, i as u32, j, rng);
    }
}

/// Seed of the generator for row `j`.
fn row_seed(seed: u64, j: u32) -> u64 {
    // Golden-ratio stride decorrelates the rows of nearby base seeds
    seed ^ (j as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Initialize the camera and render the world.
///
/// With the same seed, camera and world the image is identical for any
/// worker count.
pub fn render(
    camera: &mut Camera,
    world: &World,
    options: &RenderOptions,
) -> RenderResult<ImageBuffer> {
    let workers = options.workers.unwrap_or_else(default_workers);
    let seed = options.seed.unwrap_or_else(rand::random);
    log::debug!("Base seed {}", seed);

    render_with_rng(camera, world, workers, |j| {
        StdRng::seed_from_u64(row_seed(seed, j))
    })
}

/// Initialize the camera and render the world on `workers` threads.
///
/// Each time a worker claims row `j` it calls `make_rng(j)` and renders the
/// row with the returned generator.
pub fn render_with_rng<R, F>(
    camera: &mut Camera,
    world: &World,
    workers: usize,
    make_rng: F,
) -> RenderResult<ImageBuffer>
where
    R: RngCore,
    F: Fn(u32) -> R + Sync,
{
    camera.initialize()?;
    let camera = &*camera;

    let width = camera.image_width;
    let height = camera.image_height();
    let workers = workers.max(1);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} workers",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth,
        workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("strahl-worker-{index}"))
        .build()?;

    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);
    let next_row = AtomicUsize::new(0);
    let progress = Progress::new(height as usize);

    {
        // One slot per row; a slot is only ever locked by the worker that
        // claimed its row, so the locks are never contended.
        let rows: Vec<Mutex<&mut [Color]>> = image
            .pixels
            .chunks_mut(width as usize)
            .map(Mutex::new)
            .collect();

        pool.broadcast(|ctx| {
            let worker = ctx.index();
            let mut rows_done = 0usize;

            log::debug!("Worker {} started", worker);

            loop {
                let j = next_row.fetch_add(1, Ordering::Relaxed);
                if j >= rows.len() {
                    break;
                }

                let mut row = rows[j].lock().unwrap_or_else(PoisonError::into_inner);
                let mut rng = make_rng(j as u32);
                render_row(camera, world, j as u32, &mut row, &mut rng);
                rows_done += 1;
                progress.row_done();
            }

            log::debug!("Worker {} finished after {} rows", worker, rows_done);
        });
    }

    log::info!("Done in {:.2?}", start.elapsed());

    Ok(image)
}

/// Completed-row counter driving progress logging.
///
/// Purely informational: it never influences which rows are rendered or
/// where their pixels go.
struct Progress {
    total: usize,
    completed: AtomicUsize,
}

impl Progress {
    /// Rows between two progress lines.
    const INTERVAL: usize = 10;

    fn new(total: usize) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
        }
    }

    fn row_done(&self) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if completed % Self::INTERVAL == 0 {
            log::info!("Scanlines remaining: {}", self.total.saturating_sub(completed));
        }
    }

    #[cfg(test)]
    fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}
