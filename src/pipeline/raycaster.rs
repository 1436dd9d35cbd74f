use crate::core::color::Colour;
use crate::scene::material::MaterialKind;
use crate::scene::mesh::Triangle;
use crate::scene::model::Scene;
use nalgebra::{Matrix3, Point3, Vector3};

/// Hits closer than this to the ray origin are treated as self-intersections.
pub const MIN_DISTANCE: f32 = 1e-5;

/// Nearest hit along a ray.
///
/// `triangle` is a copy, so shading may read it freely while other rays search the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTriangleIntersection {
    pub point: Point3<f32>,
    /// Ray parameter `t`. Equals the distance for unit-length directions.
    pub distance: f32,
    pub triangle: Triangle,
    pub triangle_index: Option<usize>,
    pub u: f32,
    pub v: f32,
    pub kind: MaterialKind,
    /// Base colour at the hit, texture-sampled when mapped. Black for a miss.
    pub colour: Colour,
}

impl RayTriangleIntersection {
    /// Sentinel for "nothing hit": infinite distance, black opaque placeholder.
    pub fn miss(origin: Point3<f32>) -> Self {
        Self {
            point: origin,
            distance: f32::MAX,
            triangle: Triangle::new([Point3::origin(); 3], 0),
            triangle_index: None,
            u: 0.0,
            v: 0.0,
            kind: MaterialKind::Opaque,
            colour: Colour::BLACK,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.triangle_index.is_some()
    }
}

/// Triangles a query should not report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exclusion {
    /// Usually the surface the ray leaves from.
    pub index: Option<usize>,
    /// Skip every triangle of this material kind.
    pub kind: Option<MaterialKind>,
}

impl Exclusion {
    pub const NONE: Exclusion = Exclusion {
        index: None,
        kind: None,
    };

    pub fn triangle(index: Option<usize>) -> Self {
        Self { index, kind: None }
    }

    pub fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Solves `[-d, e0, e1] (t, u, v)^T = origin - v0`. `None` for rays parallel to the plane
/// and for degenerate triangles.
#[inline]
pub fn solve_ray_triangle(
    origin: &Point3<f32>,
    direction: &Vector3<f32>,
    triangle: &Triangle,
) -> Option<Vector3<f32>> {
    let (e0, e1) = triangle.edges();
    let system = Matrix3::from_columns(&[-direction, e0, e1]);
    let inverse = system.try_inverse()?;
    let solution = inverse * (origin - triangle.vertices[0]);
    solution.iter().all(|c| c.is_finite()).then_some(solution)
}

/// Exhaustive nearest-hit search over every triangle in `scene`.
///
/// A hit counts when `u, v` are in `[0, 1]`, `u + v <= 1` and `t > MIN_DISTANCE`. Returns
/// [`RayTriangleIntersection::miss`] when nothing qualifies.
pub fn closest_intersection(
    origin: &Point3<f32>,
    direction: &Vector3<f32>,
    scene: &Scene,
    exclude: Exclusion,
) -> RayTriangleIntersection {
    let mut closest: Option<(usize, Vector3<f32>)> = None;

    for (index, triangle) in scene.triangles.iter().enumerate() {
        if exclude.index == Some(index) {
            continue;
        }
        if let Some(kind) = exclude.kind {
            if scene.material(triangle).kind == kind {
                continue;
            }
        }
        let Some(tuv) = solve_ray_triangle(origin, direction, triangle) else {
            continue;
        };
        let (t, u, v) = (tuv.x, tuv.y, tuv.z);
        let inside = (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) && u + v <= 1.0;
        if !inside || t <= MIN_DISTANCE {
            continue;
        }
        if closest.is_none_or(|(_, best)| t < best.x) {
            closest = Some((index, tuv));
        }
    }

    let Some((index, tuv)) = closest else {
        return RayTriangleIntersection::miss(*origin);
    };
    let triangle = scene.triangles[index];
    let (u, v) = (tuv.y, tuv.z);
    RayTriangleIntersection {
        point: triangle.point_at(u, v),
        distance: tuv.x,
        triangle,
        triangle_index: Some(index),
        u,
        v,
        kind: scene.material(&triangle).kind,
        colour: scene.surface_colour(&triangle, u, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::{Material, Palette};

    fn scene_with(kinds: &[(f32, MaterialKind)]) -> Scene {
        let mut palette = Palette::new();
        let triangles = kinds
            .iter()
            .enumerate()
            .map(|(i, &(z, kind))| {
                let id = palette.insert(
                    Material::new(format!("m{i}"), Colour::new(10 * i as u8, 0, 0)).with_kind(kind),
                );
                Triangle::new(
                    [
                        Point3::new(-1.0, -1.0, z),
                        Point3::new(1.0, -1.0, z),
                        Point3::new(0.0, 1.0, z),
                    ],
                    id,
                )
            })
            .collect();
        Scene::new(triangles, palette)
    }

    #[test]
    fn nearest_hit_wins() {
        let scene = scene_with(&[(-3.0, MaterialKind::Opaque), (-1.0, MaterialKind::Opaque)]);
        let hit = closest_intersection(&Point3::origin(), &-Vector3::z(), &scene, Exclusion::NONE);
        assert_eq!(hit.triangle_index, Some(1));
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!((hit.point.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn exclusions_skip_index_and_kind() {
        let scene = scene_with(&[(-3.0, MaterialKind::Opaque), (-1.0, MaterialKind::Dielectric)]);
        let dir = -Vector3::z();

        let by_index = closest_intersection(&Point3::origin(), &dir, &scene, Exclusion::triangle(Some(1)));
        assert_eq!(by_index.triangle_index, Some(0));

        let by_kind = closest_intersection(
            &Point3::origin(),
            &dir,
            &scene,
            Exclusion::NONE.with_kind(MaterialKind::Dielectric),
        );
        assert_eq!(by_kind.triangle_index, Some(0));
        assert_eq!(by_kind.kind, MaterialKind::Opaque);
    }

    #[test]
    fn miss_returns_sentinel() {
        let scene = scene_with(&[(-3.0, MaterialKind::Opaque)]);
        let hit = closest_intersection(&Point3::origin(), &Vector3::z(), &scene, Exclusion::NONE);
        assert!(!hit.is_hit());
        assert_eq!(hit.distance, f32::MAX);
        assert_eq!(hit.colour, Colour::BLACK);
        assert_eq!(hit.kind, MaterialKind::Opaque);
    }

    #[test]
    fn parallel_and_degenerate_are_ignored() {
        let mut scene = scene_with(&[(-3.0, MaterialKind::Opaque)]);
        scene
            .triangles
            .push(Triangle::new([Point3::new(0.0, 0.0, -2.0); 3], 0));
        let parallel = closest_intersection(&Point3::origin(), &Vector3::x(), &scene, Exclusion::NONE);
        assert!(!parallel.is_hit());
        let through = closest_intersection(&Point3::origin(), &-Vector3::z(), &scene, Exclusion::NONE);
        assert_eq!(through.triangle_index, Some(0));
    }

    #[test]
    fn barycentrics_locate_the_hit() {
        let scene = scene_with(&[(-2.0, MaterialKind::Opaque)]);
        let dir = Vector3::new(-0.9, -0.9, -2.0).normalize();
        let hit = closest_intersection(&Point3::origin(), &dir, &scene, Exclusion::NONE);
        assert!(hit.is_hit());
        assert!((hit.u - 0.025).abs() < 1e-4 && (hit.v - 0.05).abs() < 1e-4);
        assert!((hit.point - Point3::new(-0.9, -0.9, -2.0)).norm() < 1e-4);
    }
}
