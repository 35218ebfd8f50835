//! Ray intersection with the bounded checkerboard floor.

use prism_core::{GroundPlane, Material};
use prism_math::{Ray, Vec3};

use crate::hittable::{EPSILON, HIT_RANGE};

/// A floor hit with its tile material already resolved.
#[derive(Debug, Clone, Copy)]
pub struct GroundHit {
    pub t: f32,
    pub p: Vec3,
    pub material: Material,
}

/// Intersect `ray` with the floor.
///
/// Rays nearly parallel to the floor (`|dir.y| <= EPSILON`) never hit it.
/// Points outside the floor's rectangle are misses even though the infinite
/// plane would be hit.
pub fn intersect_ground(ray: &Ray, ground: &GroundPlane) -> Option<GroundHit> {
    if ray.direction.y.abs() <= EPSILON {
        return None;
    }

    let t = -(ray.origin.y - ground.y) / ray.direction.y;
    if !HIT_RANGE.surrounds(t) {
        return None;
    }

    let p = ray.at(t);
    if !ground.contains_xz(p) {
        return None;
    }

    Some(GroundHit {
        t,
        p,
        material: ground.material_at(p.x, p.z),
    })
}
