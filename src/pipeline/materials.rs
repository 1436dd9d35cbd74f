use crate::core::color::Colour;
use crate::core::pipeline::ShadingParams;
use crate::pipeline::raycaster::{Exclusion, RayTriangleIntersection, closest_intersection};
use crate::scene::material::MaterialKind;
use crate::scene::model::Scene;
use nalgebra::Vector3;

/// Mirror of `incident` about the unit `normal`.
#[inline]
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Snell refraction of the unit `incident` through a surface with unit `normal`.
///
/// The sign of `incident . normal` decides between entering (air to `refractive_index`)
/// and exiting. Returns `None` on total internal reflection.
pub fn refract(incident: &Vector3<f32>, normal: &Vector3<f32>, refractive_index: f32) -> Option<Vector3<f32>> {
    let cos_i = incident.dot(normal).clamp(-1.0, 1.0);
    let (eta, n, cos_i) = if cos_i < 0.0 {
        (1.0 / refractive_index, *normal, -cos_i)
    } else {
        (refractive_index, -normal, cos_i)
    };
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(incident * eta + n * (eta * cos_i - k.sqrt()))
}

/// Colour a hit shows before lighting, after at most one secondary bounce.
///
/// Opaque surfaces return their own colour. Mirrors return whatever the reflected ray
/// sees. Metallic surfaces blend their colour with the reflection. Dielectrics mostly show
/// the refracted ray, tinted by the reflection. Reflections off metallic and dielectric
/// surfaces pass through metallic triangles. Secondary rays that escape the scene see
/// `background`. Neither the hit nor the scene is modified.
pub fn resolve_colour(
    hit: &RayTriangleIntersection,
    incident: &Vector3<f32>,
    scene: &Scene,
    params: &ShadingParams,
    background: Colour,
) -> Colour {
    if hit.kind == MaterialKind::Opaque || !hit.is_hit() {
        return hit.colour;
    }
    let Some(normal) = hit.triangle.normal.try_normalize(1e-12) else {
        return hit.colour;
    };
    let Some(incident) = incident.try_normalize(1e-12) else {
        return hit.colour;
    };

    let trace = |direction: Vector3<f32>, exclude: Exclusion| -> Colour {
        let secondary = closest_intersection(&hit.point, &direction, scene, exclude);
        if secondary.is_hit() {
            secondary.colour
        } else {
            background
        }
    };
    let leave_surface = Exclusion::triangle(hit.triangle_index);
    let reflected = reflect(&incident, &normal);

    match hit.kind {
        MaterialKind::Opaque => hit.colour,
        MaterialKind::Mirror => trace(reflected, leave_surface),
        MaterialKind::Metallic => {
            let seen = trace(reflected, leave_surface.with_kind(MaterialKind::Metallic));
            hit.colour.blend(seen, params.metallic_blend)
        }
        MaterialKind::Dielectric => {
            let reflection = trace(reflected, leave_surface.with_kind(MaterialKind::Metallic));
            let refraction = match refract(&incident, &normal, params.refractive_index) {
                Some(direction) => trace(direction, leave_surface.with_kind(MaterialKind::Dielectric)),
                None => reflection,
            };
            refraction.blend(reflection, params.glass_reflectivity)
        }
    }
}
