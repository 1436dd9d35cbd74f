use crate::core::color::Colour;
use crate::scene::material::{Material, Palette};
use crate::scene::mesh::Triangle;

/// Everything both pipelines read while drawing a frame.
///
/// Triangle order is draw and search order only. Every `material_id` resolves through the
/// palette, with unknown ids reading as the black fallback material.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub triangles: Vec<Triangle>,
    pub palette: Palette,
}

impl Scene {
    pub fn new(triangles: Vec<Triangle>, palette: Palette) -> Self {
        Self { triangles, palette }
    }

    pub fn material(&self, triangle: &Triangle) -> &Material {
        self.palette.get(triangle.material_id)
    }

    /// Base colour of `triangle` at barycentric `(u, v)`.
    ///
    /// Samples the material texture when both the material and the triangle are mapped.
    pub fn surface_colour(&self, triangle: &Triangle, u: f32, v: f32) -> Colour {
        let material = self.material(triangle);
        match (&material.texture, triangle.texcoord_at(u, v)) {
            (Some(texture), Some(uv)) => texture.sample(uv),
            _ => material.colour,
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
