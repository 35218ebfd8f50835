//! PRISM Core - Scene model for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Sphere`, `GroundPlane`, `Scene`
//! - **Scene descriptions**: JSON loading with invariant checks
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scenes/reference.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.sphere_count(),
//!     scene.light_count());
//! ```

pub mod loader;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, SceneDescription, SceneError, SceneResult, SphereDescription};
pub use material::Material;
pub use scene::{GroundPlane, Scene, Sphere};
