use crate::core::color::Colour;
use crate::error::{RenderError, Result};
use log::info;
use nalgebra::Vector2;
use std::path::Path;

/// A read-only texture map: row-major packed ARGB texels.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Wraps an in-memory texel array. `pixels` must hold `width * height` entries.
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)?.to_rgb8();
        let (width, height) = img.dimensions();

        let pixels = img
            .pixels()
            .map(|p| Colour::new(p[0], p[1], p[2]).to_argb())
            .collect();

        if width == 0 || height == 0 {
            return Err(RenderError::EmptyTexture(path_ref.to_path_buf()));
        }

        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Ok(Self::new(width as usize, height as usize, pixels))
    }

    /// Nearest-texel lookup. Coordinates are texels and clamp to the valid range.
    pub fn texel(&self, x: f32, y: f32) -> Colour {
        let clamp = |coord: f32, size: usize| -> usize {
            if !coord.is_finite() {
                return 0;
            }
            coord.floor().clamp(0.0, size.saturating_sub(1) as f32) as usize
        };
        let tx = clamp(x, self.width);
        let ty = clamp(y, self.height);
        Colour::from_argb(self.pixels[ty * self.width + tx])
    }

    /// Samples at a `[0, 1]` texture coordinate (row 0 is v = 0).
    pub fn sample(&self, uv: Vector2<f32>) -> Colour {
        self.texel(uv.x * self.width as f32, uv.y * self.height as f32)
    }
}
