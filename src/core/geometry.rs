use nalgebra::Vector2;

/// A projected vertex: canvas pixel coordinates plus the camera-space depth it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
    /// Camera-space z. Negative in front of the camera.
    pub depth: f32,
    /// Texture coordinate in `[0, 1]` space, carried only by textured triangles.
    pub texcoord: Option<Vector2<f32>>,
}

impl CanvasPoint {
    pub fn new(x: f32, y: f32, depth: f32) -> Self {
        Self {
            x,
            y,
            depth,
            texcoord: None,
        }
    }

    pub fn with_texcoord(mut self, texcoord: Vector2<f32>) -> Self {
        self.texcoord = Some(texcoord);
        self
    }

    /// Linear blend of position, depth and texture coordinate.
    pub fn lerp(&self, other: &CanvasPoint, t: f32) -> CanvasPoint {
        let texcoord = match (self.texcoord, other.texcoord) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            _ => None,
        };
        CanvasPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            depth: self.depth + (other.depth - self.depth) * t,
            texcoord,
        }
    }
}
