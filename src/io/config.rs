use crate::core::color::Colour;
use crate::core::pipeline::ShadingParams;
use crate::error::{RenderError, Result};
use crate::pipeline::shading::LightingMode;
use crate::scene::context::RenderMode;
use crate::scene::material::MaterialKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-run configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub materials: Vec<MaterialOverride>,
    #[serde(default)]
    pub shading: ShadingParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,

    // --- Pipeline ---
    #[serde(default)]
    pub mode: RenderMode,
    #[serde(default)]
    pub lighting: LightingMode,
    #[serde(default = "default_true")]
    pub ambient: bool,
    #[serde(default = "default_true")]
    pub textured: bool,
    #[serde(default)]
    pub background: Colour,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            mode: RenderMode::default(),
            lighting: LightingMode::default(),
            ambient: true,
            textured: true,
            background: Colour::BLACK,
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    /// Aim the camera here at startup. Without it the camera looks down world -Z.
    #[serde(default)]
    pub target: Option<[f32; 3]>,
    #[serde(default = "default_focal_length")]
    pub focal_length: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,

    // --- Animation & controls ---
    #[serde(default)]
    pub orbit: bool,
    #[serde(default = "default_orbit_step")]
    pub orbit_step: f32,
    #[serde(default = "default_move_step")]
    pub move_step: f32,
    #[serde(default = "default_rotate_step")]
    pub rotate_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: None,
            focal_length: default_focal_length(),
            scale: default_scale(),
            orbit: false,
            orbit_step: default_orbit_step(),
            move_step: default_move_step(),
            rotate_step: default_rotate_step(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 4.0]
}
fn default_focal_length() -> f32 {
    2.0
}
fn default_scale() -> f32 {
    500.0
}
fn default_orbit_step() -> f32 {
    0.05
}
fn default_move_step() -> f32 {
    0.1
}
fn default_rotate_step() -> f32 {
    0.05
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
    #[serde(default = "default_move_step")]
    pub step: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: default_light_position(),
            step: default_move_step(),
        }
    }
}

fn default_light_position() -> [f32; 3] {
    [0.0, 0.8, 0.5]
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    /// OBJ file to render. Without one the built-in demo scene is used.
    #[serde(default)]
    pub obj: Option<PathBuf>,
    /// Multiplies every vertex position.
    #[serde(default = "default_scene_scale")]
    pub scale: f32,
    #[serde(default = "default_true")]
    pub smooth_normals: bool,
    /// Texture applied to every textured-coordinate triangle whose material has none.
    #[serde(default)]
    pub texture: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            obj: None,
            scale: default_scene_scale(),
            smooth_normals: true,
            texture: None,
        }
    }
}

fn default_scene_scale() -> f32 {
    1.0
}

/// Overrides for one palette entry, matched by material name.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialOverride {
    pub name: String,
    #[serde(default)]
    pub kind: MaterialKind,
    #[serde(default)]
    pub colour: Option<Colour>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.mode, RenderMode::Rasterized);
        assert_eq!(config.render.lighting, LightingMode::Flat);
        assert!(config.render.ambient);
        assert_eq!(config.camera.position, [0.0, 0.0, 4.0]);
        assert_eq!(config.camera.scale, 500.0);
        assert_eq!(config.shading, ShadingParams::default());
        assert!(config.scene.obj.is_none());
        assert!(config.materials.is_empty());
    }

    #[test]
    fn parses_full_document() {
        let text = r#"
            [render]
            width = 320
            height = 240
            mode = "raytraced"
            lighting = "combined_shadow"
            background = [10, 20, 300]

            [camera]
            position = [0.0, 0.5, 3.0]
            target = [0.0, 0.0, 0.0]
            orbit = true

            [scene]
            obj = "cornell-box.obj"
            scale = 0.17

            [[materials]]
            name = "Grey"
            kind = "metallic"

            [[materials]]
            name = "Orange"
            kind = "dielectric"
            colour = [255, 128, 0]

            [shading]
            specular_exponent = 32.0
        "#;
        let config = Config::from_toml(text).unwrap();
        assert_eq!(config.render.mode, RenderMode::Raytraced);
        assert_eq!(config.render.lighting, LightingMode::CombinedShadow);
        assert_eq!(config.render.background, Colour::new(10, 20, 255));
        assert_eq!(config.camera.target, Some([0.0, 0.0, 0.0]));
        assert!(config.camera.orbit);
        assert_eq!(config.scene.obj, Some(PathBuf::from("cornell-box.obj")));
        assert_eq!(config.materials.len(), 2);
        assert_eq!(config.materials[0].kind, MaterialKind::Metallic);
        assert_eq!(config.materials[1].colour, Some(Colour::new(255, 128, 0)));
        assert_eq!(config.shading.specular_exponent, 32.0);
        assert_eq!(config.shading.metallic_blend, 0.75);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let err = Config::from_toml("[render]\nmode = \"pathtraced\"").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }
}
