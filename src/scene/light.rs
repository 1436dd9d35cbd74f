use nalgebra::{Point3, Vector3};

/// The single point light both pipelines shade against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
}

impl Light {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }
}
