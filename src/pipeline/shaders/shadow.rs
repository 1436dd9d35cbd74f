use crate::core::pipeline::{LightingModel, ShadingInput};
use crate::pipeline::raycaster::{Exclusion, closest_intersection};

/// 0 when another triangle sits between the surface point and the light, else 1.
///
/// The shadow ray skips the surface it starts on.
pub fn shadow_term(input: &ShadingInput) -> f32 {
    let to_light = input.light - input.point;
    let light_distance = to_light.norm();
    if light_distance <= f32::EPSILON {
        return 1.0;
    }
    let direction = to_light / light_distance;
    let blocker = closest_intersection(
        &input.point,
        &direction,
        input.scene,
        Exclusion::triangle(input.triangle_index),
    );
    if blocker.is_hit() && blocker.distance < light_distance {
        0.0
    } else {
        1.0
    }
}

/// Binary hard shadows with no ambient lift, so occluded surfaces go fully black.
pub struct HardShadow;

impl LightingModel for HardShadow {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        shadow_term(input)
    }

    fn uses_ambient(&self) -> bool {
        false
    }
}
