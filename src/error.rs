use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling a scene or moving pixels in and out of the renderer.
///
/// Rendering a frame never fails: degenerate geometry and ray misses are handled inline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to load OBJ '{path}': {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("texture {0:?} has no pixels")]
    EmptyTexture(PathBuf),

    #[error("scene '{0}' contains no triangles")]
    EmptyScene(String),

    #[error("display surface error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
