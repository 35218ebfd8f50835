//! Pinhole camera for primary ray generation.

use prism_math::{Ray, Vec3};

/// A pinhole camera looking down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    /// Eye position
    origin: Vec3,
    /// Vertical field of view in radians
    fov: f32,
}

impl Camera {
    /// Create a new camera with default settings (1280x720, fov 1.05 rad).
    pub fn new() -> Self {
        Self {
            image_width: 1280,
            image_height: 720,
            origin: Vec3::ZERO,
            fov: 1.05,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the vertical field of view in radians.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set the eye position.
    pub fn with_position(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Distance from the eye to the image plane, measured in pixels.
    fn image_plane_depth(&self) -> f32 {
        self.image_height as f32 / (2.0 * (self.fov / 2.0).tan())
    }

    /// Generate the primary ray through the center of pixel (x, y), with
    /// x the column and y the row counted from the top.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let dir_x = (x as f32 + 0.5) - self.image_width as f32 / 2.0;
        let dir_y = -(y as f32 + 0.5) + self.image_height as f32 / 2.0;
        let dir_z = -self.image_plane_depth();

        Ray::new(self.origin, Vec3::new(dir_x, dir_y, dir_z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
