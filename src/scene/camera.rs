use crate::core::geometry::CanvasPoint;
use crate::core::math::transform::{TransformFactory, camera_to_world, world_to_camera};
use nalgebra::{Matrix3, Point3, Vector3};

/// Camera-space depth a vertex must be beyond to be projected.
pub const NEAR_PLANE: f32 = 1e-4;

/// Pinhole camera shared by the rasterizer and the ray tracer.
///
/// `orientation` columns are (right, up, forward); the camera looks down `-forward`, so
/// visible points have negative camera-space z. `focal_length` and `scale` drive both the
/// world->canvas projection and the pixel->ray mapping, keeping the two pipelines aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub orientation: Matrix3<f32>,
    pub focal_length: f32,
    /// Canvas pixels per unit of image plane.
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 4.0), 2.0, 500.0)
    }
}

impl Camera {
    /// Camera at `position` with the identity orientation (looking down world -Z).
    pub fn new(position: Point3<f32>, focal_length: f32, scale: f32) -> Self {
        Self {
            position,
            orientation: Matrix3::identity(),
            focal_length,
            scale,
        }
    }

    pub fn looking_at(mut self, target: &Point3<f32>) -> Self {
        self.look_at(target);
        self
    }

    pub fn look_at(&mut self, target: &Point3<f32>) {
        self.orientation = TransformFactory::look_at(&self.position, target);
    }

    #[inline]
    pub fn to_camera_space(&self, point: &Point3<f32>) -> Vector3<f32> {
        world_to_camera(point, &self.position, &self.orientation)
    }

    /// World point -> canvas pixel, carrying the camera-space depth.
    ///
    /// Only meaningful for points in front of the camera (`depth < -NEAR_PLANE`).
    pub fn project_to_canvas(&self, point: &Point3<f32>, width: usize, height: usize) -> CanvasPoint {
        let c = self.to_camera_space(point);
        let k = self.focal_length * self.scale / c.z;
        CanvasPoint::new(
            width as f32 / 2.0 - k * c.x,
            height as f32 / 2.0 + k * c.y,
            c.z,
        )
    }

    /// Canvas pixel -> normalized world-space ray direction. Exact inverse of
    /// [`Camera::project_to_canvas`] up to the ray's length.
    pub fn pixel_ray_direction(&self, x: f32, y: f32, width: usize, height: usize) -> Vector3<f32> {
        let local = Vector3::new(
            (x - width as f32 / 2.0) / self.scale,
            -(y - height as f32 / 2.0) / self.scale,
            -self.focal_length,
        );
        camera_to_world(&local, &self.orientation).normalize()
    }

    pub fn is_visible(&self, point: &Point3<f32>) -> bool {
        self.to_camera_space(point).z < -NEAR_PLANE
    }

    /// Moves the camera by `offset` in world space.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    /// Pitch about the camera's own right axis.
    pub fn rotate_x(&mut self, angle_rad: f32) {
        self.orientation *= TransformFactory::rotation_x(angle_rad);
    }

    /// Yaw about the camera's own up axis.
    pub fn rotate_y(&mut self, angle_rad: f32) {
        self.orientation *= TransformFactory::rotation_y(angle_rad);
    }

    /// Swings the camera about the world Y axis through the origin, then re-aims at the origin.
    pub fn orbit(&mut self, angle_rad: f32) {
        self.position = Point3::from(TransformFactory::rotation_y(angle_rad) * self.position.coords);
        self.look_at(&Point3::origin());
    }
}
