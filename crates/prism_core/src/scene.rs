//! Scene types for PRISM.
//!
//! A scene is built once before rendering and then only read. The renderer
//! borrows it as `&Scene`, so it can be shared by any number of worker
//! threads without locking.

use std::sync::Arc;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::loader::{SceneError, SceneResult};
use crate::material::Material;

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    /// Shared material; many spheres may point at one instance
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A bounded, horizontal checkerboard floor.
///
/// Only the rectangle `|x| < half_width`, `z_far < z < z_near` at height `y`
/// counts as a hit. The tile color is picked from the parity of
/// `floor(checker_scale * x + checker_offset) + floor(checker_scale * z)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    pub y: f32,
    pub half_width: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub checker_scale: f32,
    /// Keeps the x tile index non-negative across the floor's extent
    pub checker_offset: f32,
    pub odd_color: Vec3,
    pub even_color: Vec3,
    /// Base material; its diffuse color is replaced by the tile color
    pub material: Material,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            y: -4.0,
            half_width: 10.0,
            z_near: -10.0,
            z_far: -30.0,
            checker_scale: 0.5,
            checker_offset: 1000.0,
            odd_color: Vec3::new(0.3, 0.3, 0.3),
            even_color: Vec3::new(0.3, 0.2, 0.1),
            material: Material::default(),
        }
    }
}

impl GroundPlane {
    /// Whether `point` lies inside the floor's horizontal extent.
    pub fn contains_xz(&self, point: Vec3) -> bool {
        point.x.abs() < self.half_width && point.z > self.z_far && point.z < self.z_near
    }

    /// Checkerboard color at floor coordinates (x, z).
    pub fn tile_color(&self, x: f32, z: f32) -> Vec3 {
        let ix = (self.checker_scale * x + self.checker_offset).floor() as i64;
        let iz = (self.checker_scale * z).floor() as i64;
        // Parity of the sum is the xor of the low bits; saturated casts stay in range.
        if (ix ^ iz) & 1 == 1 {
            self.odd_color
        } else {
            self.even_color
        }
    }

    /// Material at floor coordinates (x, z).
    pub fn material_at(&self, x: f32, z: f32) -> Material {
        self.material.with_diffuse_color(self.tile_color(x, z))
    }
}

/// A complete scene: spheres, point lights and an optional floor.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Vec3>,
    pub ground: Option<GroundPlane>,
}

impl Scene {
    /// Create an empty scene (no spheres, no lights, no floor).
    pub fn new() -> Self {
        Self::default()
    }

    /// The four-sphere demo scene with three lights and the checkerboard floor.
    pub fn reference() -> Self {
        let ivory = Arc::new(Material::ivory());
        let glass = Arc::new(Material::glass());
        let red_rubber = Arc::new(Material::red_rubber());
        let mirror = Arc::new(Material::mirror());

        let mut scene = Scene::new().with_ground(GroundPlane::default());
        scene.add_sphere(Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 2.0, ivory));
        scene.add_sphere(Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, glass));
        scene.add_sphere(Sphere::new(Vec3::new(1.5, -0.5, -18.0), 3.0, red_rubber));
        scene.add_sphere(Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, mirror));

        scene.add_light(Vec3::new(-20.0, 20.0, 20.0));
        scene.add_light(Vec3::new(30.0, 50.0, -25.0));
        scene.add_light(Vec3::new(30.0, 20.0, 30.0));

        scene
    }

    /// Set the floor.
    pub fn with_ground(mut self, ground: GroundPlane) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Add a point light at `position`.
    pub fn add_light(&mut self, position: Vec3) {
        self.lights.push(position);
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check every geometric and material invariant.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(SceneError::InvalidRadius {
                    sphere: index,
                    radius: sphere.radius,
                });
            }
            sphere.material.validate(&format!("sphere {index}"))?;
        }

        if let Some(ground) = &self.ground {
            if !(ground.half_width > 0.0) || !(ground.z_far < ground.z_near) {
                return Err(SceneError::InvalidGround(format!(
                    "empty extent (half_width {}, z band {}..{})",
                    ground.half_width, ground.z_far, ground.z_near
                )));
            }
            if !(ground.checker_scale.is_finite() && ground.checker_offset.is_finite()) {
                return Err(SceneError::InvalidGround(format!(
                    "non-finite checker pattern (scale {}, offset {})",
                    ground.checker_scale, ground.checker_offset
                )));
            }
            ground.material.validate("ground")?;
        }

        Ok(())
    }
}
