use crate::pipeline::shading::LightingMode;
use crate::scene::context::{RenderContext, RenderMode};
use log::info;
use nalgebra::{Point3, Vector3};

/// A user action, decoupled from whichever surface produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Translate the camera along a world axis; scaled by `move_step`.
    MoveCamera(Vector3<f32>),
    /// Pitch by `sign * rotate_step`.
    Pitch(f32),
    /// Yaw by `sign * rotate_step`.
    Yaw(f32),
    LookAtOrigin,
    ToggleOrbit,
    /// Raise (+1) or lower (-1) the light by `light_step`.
    MoveLight(f32),
    SetRenderMode(RenderMode),
    SetLightingMode(LightingMode),
    NextLightingMode,
    ToggleAmbient,
    ToggleTextures,
    RandomTriangle { filled: bool },
    Screenshot,
    Quit,
}

/// Applies a between-frames command to the render state.
///
/// Returns `true` when the context changed and the frame must be redrawn. Commands the run
/// loop handles itself leave the context alone and return `false`.
pub fn apply_command(context: &mut RenderContext, command: Command) -> bool {
    match command {
        Command::MoveCamera(direction) => {
            context.camera.translate(direction * context.move_step);
        }
        Command::Pitch(sign) => context.camera.rotate_x(sign * context.rotate_step),
        Command::Yaw(sign) => context.camera.rotate_y(sign * context.rotate_step),
        Command::LookAtOrigin => context.camera.look_at(&Point3::origin()),
        Command::ToggleOrbit => {
            context.orbit = !context.orbit;
            info!("Orbit: {}", context.orbit);
        }
        Command::MoveLight(sign) => {
            context.light.translate(Vector3::y() * sign * context.light_step);
            info!("Light at {:?}", context.light.position.coords.as_slice());
        }
        Command::SetRenderMode(mode) => {
            context.render_mode = mode;
            info!("Render mode: {:?}", mode);
        }
        Command::SetLightingMode(mode) => {
            context.lighting_mode = mode;
            info!("Lighting mode: {:?}", mode);
        }
        Command::NextLightingMode => {
            context.lighting_mode = context.lighting_mode.next();
            info!("Lighting mode: {:?}", context.lighting_mode);
        }
        Command::ToggleAmbient => {
            context.ambient = !context.ambient;
            info!("Ambient floor: {}", context.ambient);
        }
        Command::ToggleTextures => {
            context.textured = !context.textured;
            info!("Textures: {}", context.textured);
        }
        Command::RandomTriangle { .. } | Command::Screenshot | Command::Quit => return false,
    }
    true
}

#[cfg(feature = "window")]
pub use keymap::command_for_key;

#[cfg(feature = "window")]
mod keymap {
    use super::Command;
    use crate::pipeline::shading::LightingMode;
    use crate::scene::context::RenderMode;
    use minifb::Key;
    use nalgebra::Vector3;

    /// Keyboard layout of the window surface.
    pub fn command_for_key(key: Key) -> Option<Command> {
        let command = match key {
            // Camera translation
            Key::Left => Command::MoveCamera(-Vector3::x()),
            Key::Right => Command::MoveCamera(Vector3::x()),
            Key::Up => Command::MoveCamera(Vector3::y()),
            Key::Down => Command::MoveCamera(-Vector3::y()),
            Key::W => Command::MoveCamera(-Vector3::z()),
            Key::S => Command::MoveCamera(Vector3::z()),

            // Orientation
            Key::I => Command::Pitch(1.0),
            Key::K => Command::Pitch(-1.0),
            Key::J => Command::Yaw(1.0),
            Key::L => Command::Yaw(-1.0),
            Key::C => Command::LookAtOrigin,
            Key::O => Command::ToggleOrbit,

            Key::PageUp => Command::MoveLight(1.0),
            Key::PageDown => Command::MoveLight(-1.0),

            Key::Key1 => Command::SetRenderMode(RenderMode::Wireframe),
            Key::Key2 => Command::SetRenderMode(RenderMode::Rasterized),
            Key::Key3 => Command::SetRenderMode(RenderMode::Raytraced),
            Key::Key0 => Command::SetLightingMode(LightingMode::Flat),
            Key::M => Command::NextLightingMode,
            Key::N => Command::ToggleAmbient,
            Key::T => Command::ToggleTextures,

            Key::U => Command::RandomTriangle { filled: false },
            Key::F => Command::RandomTriangle { filled: true },
            Key::P => Command::Screenshot,
            Key::Escape => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn layout_covers_modes_and_quit() {
            assert_eq!(
                command_for_key(Key::Key3),
                Some(Command::SetRenderMode(RenderMode::Raytraced))
            );
            assert_eq!(command_for_key(Key::Escape), Some(Command::Quit));
            assert_eq!(command_for_key(Key::Q), None);
        }
    }
}
