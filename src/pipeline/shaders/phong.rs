use crate::core::math::interpolation::barycentric_blend;
use crate::core::pipeline::{LightingModel, ShadingInput};
use crate::pipeline::shaders::diffuse::{lambert, proximity};
use crate::pipeline::shaders::specular::specular;
use nalgebra::Vector3;

/// Unit-gain diffuse plus a tight highlight for one normal, capped at 1.
fn lit(input: &ShadingInput, normal: &Vector3<f32>) -> f32 {
    let diffuse = proximity(&input.point, &input.light) * lambert(normal, &input.point, &input.light);
    let highlight = specular(
        &input.point,
        normal,
        &input.eye,
        &input.light,
        input.params.smooth_exponent,
    );
    (diffuse + highlight).min(1.0)
}

/// Lights each vertex normal separately, then blends the three brightnesses.
pub struct Gouraud;

impl LightingModel for Gouraud {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        let normals = &input.triangle.vertex_normals;
        let per_vertex = [lit(input, &normals[0]), lit(input, &normals[1]), lit(input, &normals[2])];
        barycentric_blend(per_vertex, input.u, input.v)
    }
}

/// Blends the vertex normals, then lights the blended normal once.
pub struct Phong;

impl LightingModel for Phong {
    fn brightness(&self, input: &ShadingInput) -> f32 {
        let normal = barycentric_blend(input.triangle.vertex_normals, input.u, input.v);
        lit(input, &normal)
    }
}
