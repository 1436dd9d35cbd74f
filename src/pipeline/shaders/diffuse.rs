use crate::core::pipeline::{LightingModel, ShadingInput};
use nalgebra::{Point3, Vector3};

/// `1 / (3 d^2)` falloff with the light distance, capped at 1.
#[inline]
pub fn proximity(point: &Point3<f32>, light: &Point3<f32>) -> f32 {
    let d2 = (light - point).norm_squared();
    (1.0 / (3.0 * d2)).min(1.0)
}

/// Unit `normal` dotted with the raw `light - point` vector, clamped at 0.
///
/// The to-light vector keeps its length, so the term grows with distance and only
/// the `1 / (3 d^2)` proximity factor makes diffuse light fall off. A zero normal gives 0.
#[inline]
pub fn lambert(normal: &Vector3<f32>, point: &Point3<f32>, light: &Point3<f32>) -> f32 {
    let Some(n) = normal.try_normalize(1e-12) else {
        return 0.0;
    };
    n.dot(&(light - point)).max(0.0)
}

/// Distance falloff only.
pub struct Proximity;

impl LightingModel for Proximity {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        proximity(&input.point, &input.light)
    }
}

/// Proximity times the Lambert term of the face normal, times the diffuse gain.
pub struct Diffuse;

impl Diffuse {
    pub fn evaluate(input: &ShadingInput) -> f32 {
        proximity(&input.point, &input.light)
            * lambert(&input.triangle.normal, &input.point, &input.light)
            * input.params.diffuse_gain
    }
}

impl LightingModel for Diffuse {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        Self::evaluate(input)
    }
}
