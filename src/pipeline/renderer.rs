use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::{Fill, Rasterizer, random_colour, random_triangle};
use crate::pipeline::passes::{render_rasterized_pass, render_raytraced_pass, render_wireframe_pass};
use crate::scene::context::{RenderContext, RenderMode};
use crate::scene::model::Scene;
use log::debug;
use std::time::Instant;

/// Owns the frame and depth buffers and draws scenes into them.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Draws one frame with the pipeline `context.render_mode` selects.
    pub fn render(&self, scene: &Scene, context: &RenderContext) {
        let start = Instant::now();
        match context.render_mode {
            RenderMode::Wireframe => render_wireframe_pass(self, scene, context),
            RenderMode::Rasterized => render_rasterized_pass(self, scene, context),
            RenderMode::Raytraced => render_raytraced_pass(self, scene, context),
        }
        debug!(
            "{:?} frame ({:?}) in {:.2?}",
            context.render_mode,
            context.lighting_mode,
            start.elapsed()
        );
    }

    /// Draws a random triangle with a random colour over the current frame.
    pub fn draw_random_triangle(&self, filled: bool) {
        let mut rng = rand::rng();
        let fb = &self.framebuffer;
        let points = random_triangle(&mut rng, fb.width, fb.height);
        let colour = random_colour(&mut rng);
        if filled {
            self.rasterizer.fill_triangle(fb, points, Fill::Flat(colour));
        } else {
            self.rasterizer.draw_stroked_triangle(fb, &points, colour);
        }
    }
}
