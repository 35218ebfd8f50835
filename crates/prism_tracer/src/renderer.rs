//! Render loop and image buffer.
//!
//! `render` is the sequential reference loop. `render_parallel` splits the
//! image into buckets over the rayon pool; since shading is a pure function
//! of (scene, ray), both produce bit-identical buffers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use prism_core::Scene;
use prism_math::Vec3;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::output::{color_to_rgb8, ToneMap};
use crate::shading::cast_ray;
use crate::Camera;

/// Color type alias (RGB, unclamped; values above 1.0 are valid)
pub type Color = Vec3;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Deepest recursion level that is still shaded
    pub max_depth: u32,
    /// Color returned for misses and past the depth limit
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            background: Color::new(0.2, 0.7, 0.8),
        }
    }
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.get_ray(x, y);
    cast_ray(scene, &ray, 0, config)
}

/// Row-major buffer of unclamped colors.
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

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a rendered bucket into its region of the image.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        let row_len = bucket.width as usize;
        if row_len == 0 {
            return;
        }
        for (local_y, row) in result.pixels.chunks_exact(row_len).enumerate() {
            let start = self.index(bucket.x, bucket.y + local_y as u32);
            self.pixels[start..start + row_len].copy_from_slice(row);
        }
    }

    /// Raw channel view: `width * height * 3` floats, RGB interleaved.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to 8-bit RGB bytes using an explicit tone-mapping policy.
    pub fn to_rgb8(&self, tone_map: ToneMap) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color, tone_map));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer, one row after another.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    render_with_progress(camera, scene, config, |_, _| {})
}

/// Sequential render that reports `(rows_done, total_rows)` after each row.
///
/// The buffer is only returned once every pixel has been written.
pub fn render_with_progress<F>(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    mut progress: F,
) -> ImageBuffer
where
    F: FnMut(u32, u32),
{
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} (max depth {}, {} spheres, {} lights)",
        camera.image_width,
        camera.image_height,
        config.max_depth,
        scene.sphere_count(),
        scene.light_count()
    );

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, x, y, config);
            image.set(x, y, color);
        }
        progress(y + 1, camera.image_height);
        log::debug!("Row {}/{}", y + 1, camera.image_height);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

/// Render the scene in buckets spread over the rayon thread pool.
pub fn render_parallel(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        rayon::current_num_threads()
    );

    let finished = AtomicUsize::new(0);
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, scene, config);
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, done, buckets.len());
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
