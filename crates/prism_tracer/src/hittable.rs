//! HitRecord and the scene-wide nearest-hit query.

use prism_core::{Material, Scene};
use prism_math::{Interval, Ray, Vec3, VectorExt};

use crate::ground::intersect_ground;
use crate::sphere::intersect_sphere;

/// Minimum accepted hit distance. Rejects hits at the ray origin caused by
/// floating-point error when a ray starts on a surface.
pub const EPSILON: f32 = 0.001;

/// Hits at or beyond this distance count as misses.
pub const FAR_CLIP: f32 = 1000.0;

/// Distances accepted by the individual primitive tests.
pub(crate) const HIT_RANGE: Interval = Interval::new(EPSILON, f32::INFINITY);

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit geometric normal (outward for spheres, +Y for the floor)
    pub normal: Vec3,
    /// Whether the ray arrived from the side the normal points to
    pub front_face: bool,
    /// Material at the intersection point
    pub material: Material,
}

impl HitRecord {
    /// Build a record from a ray, a distance and the outward normal there.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: Material) -> Self {
        Self {
            t,
            p: ray.at(t),
            normal: outward_normal,
            front_face: ray.direction.dot(outward_normal) < 0.0,
            material,
        }
    }
}

/// Find the nearest hit of `ray` against the floor and every sphere.
///
/// The floor is tested first, then spheres in scene order; a later candidate
/// at the same distance replaces an earlier one. Returns `None` when nothing
/// is hit closer than `FAR_CLIP`.
pub fn scene_intersect(scene: &Scene, ray: &Ray) -> Option<HitRecord> {
    let mut nearest: Option<HitRecord> = None;
    let mut nearest_t = f32::INFINITY;

    if let Some(ground) = &scene.ground {
        if let Some(hit) = intersect_ground(ray, ground) {
            nearest_t = hit.t;
            nearest = Some(HitRecord::new(ray, hit.t, Vec3::Y, hit.material));
        }
    }

    for sphere in &scene.spheres {
        let Some(t) = intersect_sphere(ray, sphere) else {
            continue;
        };
        if t > nearest_t {
            continue;
        }

        nearest_t = t;
        let p = ray.at(t);
        let normal = (p - sphere.center).normalized();
        nearest = Some(HitRecord::new(ray, t, normal, *sphere.material));
    }

    nearest.filter(|hit| hit.t < FAR_CLIP)
}
