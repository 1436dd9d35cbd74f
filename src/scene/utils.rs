use crate::scene::mesh::Triangle;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

/// Bit pattern key, so vertices are shared only on exact positional equality.
fn position_key(p: &Point3<f32>) -> [u32; 3] {
    // -0.0 and 0.0 are the same position.
    let bits = |v: f32| if v == 0.0 { 0 } else { v.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

/// Replaces every triangle's vertex normals with the normalized sum of the face normals
/// of all triangles that share that exact vertex position.
///
/// Face normals are summed unnormalized, so larger faces weigh more. A vertex whose summed
/// normal vanishes keeps its previous normal.
pub fn compute_vertex_normals(triangles: &mut [Triangle]) {
    let mut sums: HashMap<[u32; 3], Vector3<f32>> = HashMap::new();

    for tri in triangles.iter() {
        let n = tri.normal;
        for v in &tri.vertices {
            *sums.entry(position_key(v)).or_insert_with(Vector3::zeros) += n;
        }
    }

    for tri in triangles.iter_mut() {
        for (i, v) in tri.vertices.iter().enumerate() {
            if let Some(sum) = sums.get(&position_key(v)) {
                if let Some(unit) = sum.try_normalize(1e-12) {
                    tri.vertex_normals[i] = unit;
                }
            }
        }
    }
}

/// Multiplies every vertex by `factor` and recomputes the face normals.
pub fn scale_triangles(triangles: &mut [Triangle], factor: f32) {
    for tri in triangles.iter_mut() {
        let scaled = tri.vertices.map(|v| Point3::from(v.coords * factor));
        let rebuilt = Triangle::new(scaled, tri.material_id);
        tri.vertices = rebuilt.vertices;
        tri.normal = rebuilt.normal;
        tri.vertex_normals = rebuilt.vertex_normals;
    }
}

/// Axis-aligned bounds of all vertices, or `None` for an empty slice.
pub fn bounds(triangles: &[Triangle]) -> Option<(Point3<f32>, Point3<f32>)> {
    let mut iter = triangles.iter().flat_map(|t| t.vertices.iter());
    let first = *iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), p| {
        (
            Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
            Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_vertex_averages_adjacent_faces() {
        // Two faces meeting at a 90 degree ridge along the x axis.
        let mut tris = vec![
            Triangle::new(
                [
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                ],
                0,
            ),
            Triangle::new(
                [
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(0.0, 0.0, 1.0),
                    Point3::new(1.0, 0.0, 0.0),
                ],
                0,
            ),
        ];
        compute_vertex_normals(&mut tris);

        let expected = Vector3::new(0.0, 1.0, 1.0).normalize();
        assert!((tris[0].vertex_normals[0] - expected).norm() < 1e-6);
        assert!((tris[1].vertex_normals[2] - expected).norm() < 1e-6);
        // Unshared corner keeps its own face direction.
        assert!((tris[0].vertex_normals[2] - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn scaling_moves_vertices_and_normals() {
        let mut tris = vec![Triangle::new(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            3,
        )];
        scale_triangles(&mut tris, 2.0);
        assert_eq!(tris[0].vertices[1], Point3::new(2.0, 0.0, 0.0));
        assert_eq!(tris[0].normal, Vector3::new(0.0, 0.0, 4.0));
        assert_eq!(tris[0].material_id, 3);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let tris = [Triangle::new(
            [
                Point3::new(-1.0, 2.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(0.0, -4.0, 5.0),
            ],
            0,
        )];
        let (lo, hi) = bounds(&tris).unwrap();
        assert_eq!(lo, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(hi, Point3::new(3.0, 2.0, 5.0));
        assert!(bounds(&[]).is_none());
    }
}
