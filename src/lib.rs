//! Software renderer with two pipelines over one triangle scene: a depth-buffered
//! scanline rasterizer and a one-bounce ray tracer with per-material reflection and
//! refraction.

pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod ui;

pub use error::{RenderError, Result};
