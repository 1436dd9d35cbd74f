use nalgebra::{Point3, Vector2, Vector3};

/// One renderable triangle, stored by value.
///
/// `normal` is the raw edge cross product; consumers normalize it when they need a unit vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
    /// Per-vertex normals for smooth shading. Default to the face normal.
    pub vertex_normals: [Vector3<f32>; 3],
    /// Texture coordinates, present on every vertex or on none.
    pub texcoords: Option<[Vector2<f32>; 3]>,
    /// Index into the owning scene's palette.
    pub material_id: usize,
}

impl Triangle {
    pub fn new(vertices: [Point3<f32>; 3], material_id: usize) -> Self {
        let normal = face_normal(&vertices);
        Self {
            vertices,
            normal,
            vertex_normals: [normal; 3],
            texcoords: None,
            material_id,
        }
    }

    pub fn with_texcoords(mut self, texcoords: [Vector2<f32>; 3]) -> Self {
        self.texcoords = Some(texcoords);
        self
    }

    /// Edge vectors from vertex 0, in the order the ray caster solves for (u, v).
    #[inline]
    pub fn edges(&self) -> (Vector3<f32>, Vector3<f32>) {
        (
            self.vertices[1] - self.vertices[0],
            self.vertices[2] - self.vertices[0],
        )
    }

    /// World point at barycentric `(u, v)` relative to vertex 0.
    pub fn point_at(&self, u: f32, v: f32) -> Point3<f32> {
        let (e0, e1) = self.edges();
        self.vertices[0] + e0 * u + e1 * v
    }

    pub fn centroid(&self) -> Point3<f32> {
        self.point_at(1.0 / 3.0, 1.0 / 3.0)
    }

    /// Zero-area triangles cannot be intersected or lit meaningfully.
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm_squared() < 1e-12
    }

    /// Texture coordinate at barycentric `(u, v)`, if the triangle is mapped.
    pub fn texcoord_at(&self, u: f32, v: f32) -> Option<Vector2<f32>> {
        self.texcoords
            .map(|t| t[0] + (t[1] - t[0]) * u + (t[2] - t[0]) * v)
    }
}

/// `(v1 - v0) x (v2 - v0)`, left unnormalized.
#[inline]
pub fn face_normal(vertices: &[Point3<f32>; 3]) -> Vector3<f32> {
    (vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]))
}
