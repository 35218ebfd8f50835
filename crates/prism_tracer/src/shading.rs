//! Recursive Whitted shading.
//!
//! Each hit spawns one reflected and one refracted ray, gathers Phong
//! diffuse and specular light from every unoccluded point light, and mixes
//! the four terms with the material's albedo weights. The weights are not
//! normalised; a material may reflect more light than it receives.

use prism_core::Scene;
use prism_math::{reflect, Interval, Ray, Vec3, VectorExt};

use crate::hittable::{scene_intersect, HitRecord};
use crate::renderer::{Color, RenderConfig};

/// Direction returned by `refract` under total internal reflection.
///
/// Not physically meaningful: the transmitted branch should really contribute
/// nothing. It keeps the refraction ray defined so shading stays total.
pub const TIR_SENTINEL: Vec3 = Vec3::X;

/// Refract `incident` through a surface with outward unit normal `normal`
/// using Snell's law.
///
/// `eta_t` is the index on the far side of the normal and `eta_i` the index
/// on the near side. When the ray arrives from behind the normal (leaving the
/// volume), the normal is flipped and the indices swapped, so one call covers
/// both entering and exiting. Returns `TIR_SENTINEL` on total internal
/// reflection.
pub fn refract(incident: Vec3, normal: Vec3, eta_t: f32, eta_i: f32) -> Vec3 {
    let cosi = -Interval::SIGNED_UNIT.clamp(incident.dot(normal));
    let (normal, cosi, eta_i, eta_t) = if cosi < 0.0 {
        (-normal, -cosi, eta_t, eta_i)
    } else {
        (normal, cosi, eta_i, eta_t)
    };

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return TIR_SENTINEL;
    }
    incident * eta + normal * (eta * cosi - k.sqrt())
}

/// Color seen along `ray`.
///
/// `depth` counts the bounces already taken. Beyond `config.max_depth`, or
/// when nothing is hit, the background color is returned, so every branch
/// stops after at most `max_depth + 2` calls.
pub fn cast_ray(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    if depth > config.max_depth {
        return config.background;
    }
    let Some(hit) = scene_intersect(scene, ray) else {
        return config.background;
    };

    let dir = ray.direction;
    let material = &hit.material;

    let reflect_dir = reflect(dir, hit.normal).normalized();
    let refract_dir = refract(dir, hit.normal, material.refractive_index, 1.0).normalized();
    let reflect_color = cast_ray(scene, &Ray::new(hit.p, reflect_dir), depth + 1, config);
    let refract_color = cast_ray(scene, &Ray::new(hit.p, refract_dir), depth + 1, config);

    let (diffuse, specular) = direct_light(scene, &hit, dir);

    material.diffuse_color * diffuse * material.diffuse_weight()
        + Color::ONE * specular * material.specular_weight()
        + reflect_color * material.reflect_weight()
        + refract_color * material.refract_weight()
}

/// Summed diffuse and specular intensities from the unoccluded lights.
fn direct_light(scene: &Scene, hit: &HitRecord, view_dir: Vec3) -> (f32, f32) {
    let mut diffuse = 0.0;
    let mut specular = 0.0;

    for light in &scene.lights {
        let to_light = *light - hit.p;
        let light_dir = to_light.normalized();
        if in_shadow(scene, hit.p, light_dir, to_light.norm()) {
            continue;
        }

        diffuse += light_dir.dot(hit.normal).max(0.0);
        specular += (-reflect(-light_dir, hit.normal))
            .dot(view_dir)
            .max(0.0)
            .powf(hit.material.specular_exponent);
    }

    (diffuse, specular)
}

/// Whether something lies strictly between `p` and a light `light_distance` away.
fn in_shadow(scene: &Scene, p: Vec3, light_dir: Vec3, light_distance: f32) -> bool {
    scene_intersect(scene, &Ray::new(p, light_dir))
        .is_some_and(|blocker| (blocker.p - p).norm() < light_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{GroundPlane, Material, Sphere};
    use std::sync::Arc;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_refract_equal_indices_is_identity() {
        let normal = Vec3::new(0.2, 1.0, 0.1).normalized();
        for incident in [
            Vec3::new(0.3, -1.0, 0.2).normalized(),
            Vec3::new(-0.7, -0.2, 0.1).normalized(),
            Vec3::new(0.1, 0.9, -0.3).normalized(),
        ] {
            assert_close(refract(incident, normal, 1.5, 1.5), incident);
            assert_close(refract(incident, normal, 1.0, 1.0), incident);
        }
    }

    #[test]
    fn test_refract_normal_incidence_passes_straight() {
        let out = refract(-Vec3::Y, Vec3::Y, 1.5, 1.0);
        assert_close(out.normalized(), -Vec3::Y);
    }

    #[test]
    fn test_refract_entering_bends_toward_normal() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalized();
        let out = refract(incident, Vec3::Y, 1.5, 1.0).normalized();

        // sin(theta_t) = sin(45 deg) / 1.5
        let expected_sin = std::f32::consts::FRAC_1_SQRT_2 / 1.5;
        assert!((out.x - expected_sin).abs() < 1e-4);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_refract_exiting_flips_normal() {
        // Leaving glass along the outward normal direction
        let incident = Vec3::new(0.3, 1.0, 0.0).normalized();
        let out = refract(incident, Vec3::Y, 1.5, 1.0).normalized();

        assert!(out.y > 0.0);
        // Bent away from the normal when leaving the denser medium
        assert!(out.x > incident.x);
    }

    #[test]
    fn test_total_internal_reflection_returns_sentinel() {
        // Grazing exit from glass: sin(theta_i) ~ 0.98 > 1 / 1.5
        let incident = Vec3::new(0.0, 0.2, 1.0).normalized();
        let out = refract(incident, Vec3::Y, 1.5, 1.0);

        assert_eq!(out, TIR_SENTINEL);
        assert!(out.is_finite());
    }

    #[test]
    fn test_depth_past_limit_returns_background() {
        let scene = Scene::reference();
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-3.0, 0.0, -16.0));

        let color = cast_ray(&scene, &ray, config.max_depth + 1, &config);
        assert_eq!(color, config.background);

        // Same ray at depth 0 hits geometry
        assert_ne!(cast_ray(&scene, &ray, 0, &config), config.background);
    }

    #[test]
    fn test_miss_returns_background() {
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cast_ray(&Scene::new(), &ray, 0, &config), config.background);
    }

    fn diffuse_sphere_scene() -> Scene {
        let matte = Material::new(1.0, [1.0, 0.0, 0.0, 0.0], Vec3::new(0.5, 0.25, 0.125), 10.0);
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Arc::new(matte)));
        scene.add_light(Vec3::new(0.0, 10.0, -5.0));
        scene
    }

    #[test]
    fn test_diffuse_sphere_lit_from_above() {
        let scene = diffuse_sphere_scene();
        // Looking straight down at the apex, light straight above it
        let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), -Vec3::Y);

        let mut colors = Vec::new();
        for max_depth in [0, 1, 4, 8] {
            let config = RenderConfig {
                max_depth,
                ..Default::default()
            };
            colors.push(cast_ray(&scene, &ray, 0, &config));
        }

        // N . L = 1 at the apex, so the color is exactly the diffuse color
        assert_close(colors[0], Vec3::new(0.5, 0.25, 0.125));
        for color in &colors[1..] {
            assert_eq!(*color, colors[0]);
        }
    }

    #[test]
    fn test_occluded_light_gives_no_direct_light() {
        let mut scene = diffuse_sphere_scene();
        // Blocker between the apex and the light
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 6.0, -5.0),
            0.5,
            Arc::new(Material::ivory()),
        ));
        let ray = Ray::new(Vec3::new(0.0, 3.0, -5.0), -Vec3::Y);

        let color = cast_ray(&scene, &ray, 0, &RenderConfig::default());
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_light_behind_blocker_distance_counts() {
        // Light sits between the surface and the would-be blocker
        let mut scene = diffuse_sphere_scene();
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 20.0, -5.0),
            1.0,
            Arc::new(Material::ivory()),
        ));
        let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), -Vec3::Y);

        let color = cast_ray(&scene, &ray, 0, &RenderConfig::default());
        assert_close(color, Vec3::new(0.5, 0.25, 0.125));
    }

    #[test]
    fn test_unlit_floor_is_black() {
        // Floor albedo is [2, 0, 0, 0]; with no lights nothing reaches it
        let scene = Scene::new().with_ground(GroundPlane::default());
        let ray = Ray::new(Vec3::new(0.0, 0.0, -20.0), -Vec3::Y);

        assert_eq!(cast_ray(&scene, &ray, 0, &RenderConfig::default()), Vec3::ZERO);
    }

    #[test]
    fn test_reference_scene_colors_are_finite() {
        let scene = Scene::reference();
        let config = RenderConfig::default();
        for dir in [
            Vec3::new(-1.0, -1.5, -12.0), // glass
            Vec3::new(7.0, 5.0, -18.0),   // mirror
            Vec3::new(0.0, -4.0, -15.0),  // floor
            Vec3::new(0.0, 1.0, 0.0),     // sky
        ] {
            let color = cast_ray(&scene, &Ray::new(Vec3::ZERO, dir), 0, &config);
            assert!(color.is_finite(), "{:?} -> {:?}", dir, color);
            assert!(color.min_element() >= 0.0);
        }
    }
}
