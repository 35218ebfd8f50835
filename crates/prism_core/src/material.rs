//! Surface materials.
//!
//! A material is plain data: shading treats every material the same way and
//! only the four albedo weights decide which terms contribute.

use prism_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::loader::{SceneError, SceneResult};

/// A Phong-style material with reflection and refraction weights.
///
/// The albedo weights are independent scalars and do not have to sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f32,

    /// Weights for the diffuse, specular, reflection and refraction terms
    pub albedo: [f32; 4],

    /// Diffuse color (RGB, conventionally 0-1)
    pub diffuse_color: Vec3,

    /// Phong exponent for specular highlights
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            refractive_index: 1.0,
            albedo: [2.0, 0.0, 0.0, 0.0],
            diffuse_color: Vec3::ZERO,
            specular_exponent: 0.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(
        refractive_index: f32,
        albedo: [f32; 4],
        diffuse_color: Vec3,
        specular_exponent: f32,
    ) -> Self {
        Self {
            refractive_index,
            albedo,
            diffuse_color,
            specular_exponent,
        }
    }

    /// Copy of this material with a different diffuse color.
    pub fn with_diffuse_color(mut self, diffuse_color: Vec3) -> Self {
        self.diffuse_color = diffuse_color;
        self
    }

    pub fn diffuse_weight(&self) -> f32 {
        self.albedo[0]
    }

    pub fn specular_weight(&self) -> f32 {
        self.albedo[1]
    }

    pub fn reflect_weight(&self) -> f32 {
        self.albedo[2]
    }

    pub fn refract_weight(&self) -> f32 {
        self.albedo[3]
    }

    /// Check the material invariants. `owner` names the material in errors.
    pub fn validate(&self, owner: &str) -> SceneResult<()> {
        if !(self.refractive_index > 0.0 && self.refractive_index.is_finite()) {
            return Err(SceneError::InvalidRefractiveIndex {
                owner: owner.to_string(),
                value: self.refractive_index,
            });
        }
        if self.albedo.iter().any(|w| !(*w >= 0.0)) {
            return Err(SceneError::NegativeAlbedo {
                owner: owner.to_string(),
                albedo: self.albedo,
            });
        }
        if !(self.specular_exponent >= 0.0) {
            return Err(SceneError::NegativeSpecularExponent {
                owner: owner.to_string(),
                value: self.specular_exponent,
            });
        }
        Ok(())
    }

    /// Matte off-white with a faint mirror component.
    pub fn ivory() -> Self {
        Self::new(1.0, [0.9, 0.5, 0.1, 0.0], Vec3::new(0.4, 0.4, 0.3), 50.0)
    }

    /// Mostly transparent, refracting material.
    pub fn glass() -> Self {
        Self::new(1.5, [0.0, 0.9, 0.1, 0.8], Vec3::new(0.6, 0.7, 0.8), 125.0)
    }

    pub fn red_rubber() -> Self {
        Self::new(1.0, [1.4, 0.3, 0.0, 0.0], Vec3::new(0.3, 0.1, 0.1), 10.0)
    }

    pub fn mirror() -> Self {
        Self::new(1.0, [0.0, 16.0, 0.8, 0.0], Vec3::new(1.0, 1.0, 1.0), 1425.0)
    }
}
