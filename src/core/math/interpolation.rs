use nalgebra::Vector3;
use std::ops::{Add, Mul, Sub};

const EPSILON: f32 = 1e-6;

/// Types that can be blended across a triangle from per-vertex samples.
pub trait Interpolatable:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
}

impl Interpolatable for f32 {}
impl Interpolatable for Vector3<f32> {}

/// Blends three per-vertex values with ray-caster barycentrics, using vertex 0 as the origin:
/// `a0 + u * (a1 - a0) + v * (a2 - a0)`.
#[inline]
pub fn barycentric_blend<T: Interpolatable>(values: [T; 3], u: f32, v: f32) -> T {
    values[0] + (values[1] - values[0]) * u + (values[2] - values[0]) * v
}

/// Fraction of the way `value` lies from `from` to `to`, clamped to `[0, 1]`.
///
/// A zero-length interval yields 0 instead of dividing by zero.
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    let span = to - from;
    if span.abs() < EPSILON {
        return 0.0;
    }
    ((value - from) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_hits_each_vertex() {
        let values = [1.0_f32, 5.0, 9.0];
        assert_eq!(barycentric_blend(values, 0.0, 0.0), 1.0);
        assert_eq!(barycentric_blend(values, 1.0, 0.0), 5.0);
        assert_eq!(barycentric_blend(values, 0.0, 1.0), 9.0);
        assert!((barycentric_blend(values, 1.0 / 3.0, 1.0 / 3.0) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn blend_works_on_vectors() {
        let n = barycentric_blend(
            [Vector3::x(), Vector3::y(), Vector3::z()],
            0.5,
            0.25,
        );
        assert!((n - Vector3::new(0.25, 0.5, 0.25)).norm() < 1e-6);
    }

    #[test]
    fn inverse_lerp_guards_zero_span() {
        assert_eq!(inverse_lerp(2.0, 2.0, 7.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 4.0, 1.0), 0.25);
        assert_eq!(inverse_lerp(0.0, 4.0, 9.0), 1.0);
    }
}
