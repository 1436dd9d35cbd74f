use crate::core::color::Colour;
use crate::core::pipeline::ShadingParams;
use crate::pipeline::shading::LightingMode;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use clap::ValueEnum;
use serde::Deserialize;

/// Which pipeline draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Wireframe,
    #[default]
    Rasterized,
    Raytraced,
}

/// Per-frame render state: camera, light and mode switches.
///
/// Input handlers mutate this between frames. A frame only ever borrows it immutably,
/// so every pixel of one frame sees the same camera and light.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub camera: Camera,
    pub light: Light,
    pub render_mode: RenderMode,
    pub lighting_mode: LightingMode,
    /// Lift lit surfaces to the ambient floor.
    pub ambient: bool,
    /// Use texture maps in the rasterizer.
    pub textured: bool,
    pub background: Colour,
    pub shading: ShadingParams,

    // --- Animation & controls ---
    pub orbit: bool,
    pub orbit_step: f32,
    pub move_step: f32,
    pub rotate_step: f32,
    pub light_step: f32,
}

impl RenderContext {
    pub fn new(camera: Camera, light: Light) -> Self {
        Self {
            camera,
            light,
            render_mode: RenderMode::default(),
            lighting_mode: LightingMode::default(),
            ambient: true,
            textured: true,
            background: Colour::BLACK,
            shading: ShadingParams::default(),
            orbit: false,
            orbit_step: 0.05,
            move_step: 0.1,
            rotate_step: 0.05,
            light_step: 0.1,
        }
    }

    /// Advances the orbit animation by one step if it is enabled.
    pub fn tick(&mut self) {
        if self.orbit {
            self.camera.orbit(self.orbit_step);
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Camera::default(), Light::new(nalgebra::Point3::new(0.0, 0.8, 0.5)))
    }
}
