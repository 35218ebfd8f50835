//! Ray-sphere intersection.

use prism_core::Sphere;
use prism_math::Ray;

use crate::hittable::HIT_RANGE;

/// Distance along `ray` to the nearest accepted intersection with `sphere`.
///
/// Uses the geometric form: project the center onto the ray, then step back
/// and forth by the half-chord. The near root wins when it lies beyond
/// `EPSILON`; otherwise the far root is tried, which covers rays starting
/// inside the sphere. Roots at or behind the origin are rejected so rays
/// leaving a surface do not hit it again.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let l = sphere.center - ray.origin;
    let tca = l.dot(ray.direction);
    let d2 = l.dot(l) - tca * tca;
    let r2 = sphere.radius * sphere.radius;
    if d2 > r2 {
        return None;
    }

    let thc = (r2 - d2).sqrt();
    let t0 = tca - thc;
    let t1 = tca + thc;

    if HIT_RANGE.surrounds(t0) {
        Some(t0)
    } else if HIT_RANGE.surrounds(t1) {
        Some(t1)
    } else {
        None
    }
}
