use nalgebra::{Matrix3, Point3, Vector3};

//=================================
// Orientation Factory
//=================================

/// Builds the 3x3 camera orientations the renderer uses.
/// Columns are always (right, up, forward), with the camera looking down -forward.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation about the X axis (pitch).
    pub fn rotation_x(angle_rad: f32) -> Matrix3<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c,  -s,
            0.0, s,   c,
        )
    }

    /// Rotation about the Y axis (yaw).
    pub fn rotation_y(angle_rad: f32) -> Matrix3<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix3::new(
            c,   0.0, s,
            0.0, 1.0, 0.0,
           -s,   0.0, c,
        )
    }

    /// Orientation that points the camera at `target` with world +Y as the up hint.
    ///
    /// Falls back to the +Z hint when the view direction is vertical.
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>) -> Matrix3<f32> {
        let offset = eye - target;
        if offset.norm_squared() < 1e-12 {
            return Matrix3::identity();
        }
        let forward = offset.normalize();
        let hint = if forward.y.abs() > 0.999 { Vector3::z() } else { Vector3::y() };
        let right = hint.cross(&forward).normalize();
        let up = forward.cross(&right);

        Matrix3::from_columns(&[right, up, forward])
    }
}

//=================================
// Core Transformation Functions
//=================================

/// World point -> camera space: translate by the eye, then project onto the basis columns.
#[inline]
pub fn world_to_camera(
    point: &Point3<f32>,
    eye: &Point3<f32>,
    orientation: &Matrix3<f32>,
) -> Vector3<f32> {
    orientation.transpose() * (point - eye)
}

/// Camera-space direction -> world direction.
#[inline]
pub fn camera_to_world(direction: &Vector3<f32>, orientation: &Matrix3<f32>) -> Vector3<f32> {
    orientation * direction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_builds_orthonormal_basis() {
        let eye = Point3::new(-3.25, 0.4, 2.3);
        let m = TransformFactory::look_at(&eye, &Point3::origin());
        let product = m.transpose() * m;
        assert!((product - Matrix3::identity()).norm() < 1e-5);

        // The target sits straight ahead, i.e. along -forward.
        let ahead = world_to_camera(&Point3::origin(), &eye, &m);
        assert!(ahead.x.abs() < 1e-5 && ahead.y.abs() < 1e-5);
        assert!(ahead.z < 0.0);
    }

    #[test]
    fn look_at_handles_vertical_view() {
        let m = TransformFactory::look_at(&Point3::new(0.0, 5.0, 0.0), &Point3::origin());
        assert!(m.iter().all(|v| v.is_finite()));
        assert!((m.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn camera_round_trip_is_identity() {
        let m = TransformFactory::rotation_y(0.3) * TransformFactory::rotation_x(-0.2);
        let d = Vector3::new(0.2, -0.7, 1.1);
        let world = camera_to_world(&d, &m);
        let back = m.transpose() * world;
        assert!((back - d).norm() < 1e-5);
    }
}
