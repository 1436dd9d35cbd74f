use crate::scene::mesh::Triangle;
use crate::scene::model::Scene;
use nalgebra::Point3;
use serde::Deserialize;

/// Tunable constants for the lighting models and the material resolver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    /// Gain applied to the Lambert term of the diffuse model.
    pub diffuse_gain: f32,
    /// Shininess used by the specular and combined models.
    pub specular_exponent: f32,
    /// Shininess used by Gouraud and Phong interpolation.
    pub smooth_exponent: f32,
    /// Lowest brightness a lit fragment may reach when ambient is enabled.
    pub ambient_floor: f32,
    /// Weight of the reflected colour on metallic surfaces.
    pub metallic_blend: f32,
    /// Weight of the reflected colour on dielectric surfaces.
    pub glass_reflectivity: f32,
    pub refractive_index: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            diffuse_gain: 1.7,
            specular_exponent: 16.0,
            smooth_exponent: 256.0,
            ambient_floor: 0.2,
            metallic_blend: 0.75,
            glass_reflectivity: 0.1,
            refractive_index: 1.5,
        }
    }
}

/// Everything a lighting model may look at for one fragment.
#[derive(Debug, Clone, Copy)]
pub struct ShadingInput<'a> {
    pub scene: &'a Scene,
    pub triangle: &'a Triangle,
    /// Index of `triangle` in the scene, so secondary rays can skip it.
    pub triangle_index: Option<usize>,
    pub point: Point3<f32>,
    /// Barycentric coordinates of `point` relative to vertex 0.
    pub u: f32,
    pub v: f32,
    pub light: Point3<f32>,
    pub eye: Point3<f32>,
    pub params: &'a ShadingParams,
}

/// A brightness model.
///
/// Implementations must be thread-safe (Send + Sync): the ray tracer shades rows in
/// parallel through one shared strategy table.
pub trait LightingModel: Send + Sync {
    /// Raw brightness before the ambient floor. Usually in `[0, 1]`.
    fn brightness(&self, input: &ShadingInput) -> f32;

    /// Whether the ambient floor may lift this model's output.
    fn uses_ambient(&self) -> bool {
        true
    }
}
