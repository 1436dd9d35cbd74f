use crate::core::pipeline::{LightingModel, ShadingInput};

/// Full brightness everywhere. Surfaces show their material colour unchanged.
pub struct Flat;

impl LightingModel for Flat {
    fn brightness(&self, _input: &ShadingInput) -> f32 {
        1.0
    }
}
