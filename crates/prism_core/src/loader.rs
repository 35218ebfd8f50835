//! Scene descriptions and JSON scene loading.
//!
//! A description names its materials once and lets spheres refer to them by
//! name, so spheres sharing a name share one `Arc<Material>` in the built
//! scene.
//!
//! ```json
//! {
//!   "materials": { "glass": { "refractive_index": 1.5, "albedo": [0, 0.9, 0.1, 0.8] } },
//!   "spheres": [ { "center": [-1, -1.5, -12], "radius": 2, "material": "glass" } ],
//!   "lights": [ [-20, 20, 20] ],
//!   "ground": {}
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Material;
use crate::scene::{GroundPlane, Scene, Sphere};

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {sphere} references unknown material '{name}'")]
    UnknownMaterial { sphere: usize, name: String },

    #[error("Sphere {sphere} has invalid radius {radius} (must be > 0)")]
    InvalidRadius { sphere: usize, radius: f32 },

    #[error("Material of {owner} has invalid refractive index {value} (must be > 0)")]
    InvalidRefractiveIndex { owner: String, value: f32 },

    #[error("Material of {owner} has negative albedo weight in {albedo:?}")]
    NegativeAlbedo { owner: String, albedo: [f32; 4] },

    #[error("Material of {owner} has negative specular exponent {value}")]
    NegativeSpecularExponent { owner: String, value: f32 },

    #[error("Invalid ground plane: {0}")]
    InvalidGround(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere as written in a scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    /// Key into `SceneDescription::materials`
    pub material: String,
}

/// Serializable form of a `Scene`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub materials: BTreeMap<String, Material>,
    pub spheres: Vec<SphereDescription>,
    pub lights: Vec<Vec3>,
    pub ground: Option<GroundPlane>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve material names and build a validated `Scene`.
    pub fn build(&self) -> SceneResult<Scene> {
        let mut shared: HashMap<&str, Arc<Material>> = HashMap::new();
        for (name, material) in &self.materials {
            material.validate(&format!("material '{name}'"))?;
            shared.insert(name.as_str(), Arc::new(*material));
        }

        let mut scene = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = shared.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    sphere: index,
                    name: sphere.material.clone(),
                }
            })?;
            scene.add_sphere(Sphere::new(sphere.center, sphere.radius, Arc::clone(material)));
        }
        for light in &self.lights {
            scene.add_light(*light);
        }
        scene.ground = self.ground;

        scene.validate()?;

        if scene.lights.is_empty() {
            log::warn!("Scene has no lights; only reflected and refracted background will show");
        }
        log::debug!(
            "Built scene: {} materials, {} spheres, {} lights, ground: {}",
            self.materials.len(),
            scene.sphere_count(),
            scene.light_count(),
            scene.ground.is_some()
        );

        Ok(scene)
    }
}

/// Load a JSON scene file and build it.
///
/// # Example
///
/// ```ignore
/// use prism_core::load_scene;
///
/// let scene = load_scene("scenes/reference.json")?;
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    log::debug!("Loading scene from {}", path.display());

    let json = std::fs::read_to_string(path)?;
    let scene = SceneDescription::from_json_str(&json)?.build()?;

    log::info!(
        "Loaded {} ({} spheres, {} lights)",
        path.display(),
        scene.sphere_count(),
        scene.light_count()
    );
    Ok(scene)
}
