use crate::core::pipeline::{LightingModel, ShadingInput};
use crate::pipeline::shaders::diffuse::Diffuse;
use crate::pipeline::shaders::shadow::shadow_term;
use nalgebra::{Point3, Vector3};

/// Phong highlight: the light direction mirrored about `normal`, dotted with the view
/// direction and raised to `exponent`. Negative dots clamp to 0.
pub fn specular(
    point: &Point3<f32>,
    normal: &Vector3<f32>,
    eye: &Point3<f32>,
    light: &Point3<f32>,
    exponent: f32,
) -> f32 {
    let (Some(n), Some(l), Some(view)) = (
        normal.try_normalize(1e-12),
        (light - point).try_normalize(1e-12),
        (eye - point).try_normalize(1e-12),
    ) else {
        return 0.0;
    };
    let reflected = n * (2.0 * n.dot(&l)) - l;
    reflected.dot(&view).max(0.0).powf(exponent)
}

pub struct Specular;

impl LightingModel for Specular {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        specular(
            &input.point,
            &input.triangle.normal,
            &input.eye,
            &input.light,
            input.params.specular_exponent,
        )
    }
}

/// The brighter of diffuse and specular.
pub struct Combined;

impl Combined {
    pub fn evaluate(input: &ShadingInput) -> f32 {
        Diffuse::evaluate(input).max(Specular.brightness(input))
    }
}

impl LightingModel for Combined {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        Self::evaluate(input)
    }
}

/// Combined lighting, forced to 0 where the light is blocked.
pub struct CombinedShadow;

impl LightingModel for CombinedShadow {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        shadow_term(input).min(Combined::evaluate(input))
    }
}
