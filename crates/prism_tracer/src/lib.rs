//! PRISM Tracer - Whitted-style recursive ray tracing.
//!
//! Spheres and a bounded checkerboard floor lit by point lights, with
//! recursive reflection and refraction up to a fixed depth. Every query is a
//! pure function of the scene and the ray, so whole images are deterministic
//! and the render loop can be split across threads freely.

mod bucket;
mod camera;
mod ground;
mod hittable;
mod output;
mod renderer;
mod shading;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use ground::{intersect_ground, GroundHit};
pub use hittable::{scene_intersect, HitRecord, EPSILON, FAR_CLIP};
pub use output::{color_to_rgb8, save_image, to_rgb_image, OutputError, OutputResult, ToneMap};
pub use renderer::{
    render, render_parallel, render_pixel, render_with_progress, Color, ImageBuffer, RenderConfig,
};
pub use shading::{cast_ray, refract, TIR_SENTINEL};
pub use sphere::intersect_sphere;

/// Re-export the scene model and math types used in the public API
pub use prism_core::{GroundPlane, Material, Scene, Sphere};
pub use prism_math::{reflect, Ray, Vec3, VectorExt};
