use crate::core::pipeline::{LightingModel, ShadingInput};
use crate::pipeline::shaders::diffuse::{Diffuse, Proximity};
use crate::pipeline::shaders::phong::{Gouraud, Phong};
use crate::pipeline::shaders::shadow::HardShadow;
use crate::pipeline::shaders::specular::{Combined, CombinedShadow, Specular};
use crate::pipeline::shaders::unlit::Flat;
use clap::ValueEnum;
use serde::Deserialize;

/// Which brightness model shades a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    #[default]
    Flat,
    HardShadow,
    Proximity,
    Diffuse,
    Specular,
    Combined,
    CombinedShadow,
    Gouraud,
    Phong,
}

/// Strategy table, indexed by `LightingMode as usize`.
static MODELS: [&dyn LightingModel; 9] = [
    &Flat,
    &HardShadow,
    &Proximity,
    &Diffuse,
    &Specular,
    &Combined,
    &CombinedShadow,
    &Gouraud,
    &Phong,
];

impl LightingMode {
    pub const ALL: [LightingMode; 9] = [
        LightingMode::Flat,
        LightingMode::HardShadow,
        LightingMode::Proximity,
        LightingMode::Diffuse,
        LightingMode::Specular,
        LightingMode::Combined,
        LightingMode::CombinedShadow,
        LightingMode::Gouraud,
        LightingMode::Phong,
    ];

    pub fn model(self) -> &'static dyn LightingModel {
        MODELS[self as usize]
    }

    /// The next mode in declaration order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }
}

/// Brightness for one fragment under `mode`.
///
/// With `ambient` on, models that allow it are lifted to the ambient floor.
pub fn shade(mode: LightingMode, input: &ShadingInput, ambient: bool) -> f32 {
    let model = mode.model();
    let brightness = model.brightness(input);
    if !brightness.is_finite() {
        return 0.0;
    }
    if ambient && model.uses_ambient() {
        brightness.max(input.params.ambient_floor)
    } else {
        brightness
    }
}
