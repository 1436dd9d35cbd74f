use crate::error::Result;
use crate::io::config::Config;
use crate::io::display::DisplaySurface;
use crate::io::image::save_framebuffer;
use crate::pipeline::renderer::Renderer;
use crate::scene::context::RenderContext;
use crate::scene::loader::{build_context, build_scene};
use crate::scene::model::Scene;
use crate::ui::input::{Command, apply_command};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Headless mode: one frame to `[render].output`, or `frames` orbit frames named
/// `frame_0000.png`, ... in the output's directory.
pub fn run_cli(config: &Config, frames: Option<usize>) -> Result<()> {
    info!("Starting CLI mode...");
    let scene = build_scene(config)?;
    let mut context = build_context(config);
    let renderer = Renderer::new(config.render.width, config.render.height);
    let output = Path::new(&config.render.output);

    let Some(count) = frames.filter(|&n| n > 0) else {
        let start = Instant::now();
        renderer.render(&scene, &context);
        info!("Render completed in {:.2?}", start.elapsed());
        return save_framebuffer(&renderer.framebuffer, output);
    };

    let dir = output.parent().unwrap_or_else(|| Path::new(""));
    let start = Instant::now();
    for index in 0..count {
        renderer.render(&scene, &context);
        save_framebuffer(&renderer.framebuffer, dir.join(format!("frame_{index:04}.png")))?;
        context.camera.orbit(context.orbit_step);
    }
    info!(
        "{} orbit frames rendered in {:.2?} ({:.1} fps)",
        count,
        start.elapsed(),
        count as f32 / start.elapsed().as_secs_f32().max(f32::EPSILON)
    );
    Ok(())
}

/// Interactive loop over any display surface. Returns the number of frames drawn.
///
/// The frame is only redrawn when a command changed the render state or the orbit is
/// running. Commands are applied between frames, never during one.
pub fn run_interactive<S: DisplaySurface>(
    surface: &mut S,
    scene: &Scene,
    mut context: RenderContext,
    renderer: &Renderer,
    screenshot_dir: &Path,
) -> Result<usize> {
    let mut frames = 0;
    let mut dirty = true;

    loop {
        if context.orbit {
            context.tick();
            dirty = true;
        }
        if dirty {
            renderer.render(scene, &context);
            surface.blit(&renderer.framebuffer);
            frames += 1;
            dirty = false;
        }
        surface.present()?;

        while let Some(command) = surface.poll_command() {
            match command {
                Command::Quit => {
                    info!("Quit after {} frames.", frames);
                    return Ok(frames);
                }
                Command::RandomTriangle { filled } => {
                    renderer.draw_random_triangle(filled);
                    surface.blit(&renderer.framebuffer);
                }
                Command::Screenshot => {
                    let path = screenshot_path(screenshot_dir);
                    if let Err(e) = save_framebuffer(&renderer.framebuffer, &path) {
                        warn!("Screenshot failed: {}", e);
                    }
                }
                other => {
                    debug!("Command: {:?}", other);
                    dirty |= apply_command(&mut context, other);
                }
            }
        }
    }
}

fn screenshot_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
    dir.join(format!("screenshot_{stamp}.png"))
}

/// Windowed mode on a `minifb` surface.
#[cfg(feature = "window")]
pub fn run_window(config: &Config) -> Result<()> {
    use crate::io::display::WindowSurface;

    let (width, height) = (config.render.width, config.render.height);
    info!("Starting window mode ({}x{})...", width, height);
    info!(
        "Controls: arrows/W/S=move, I/J/K/L=rotate, C=look at origin, O=orbit, PgUp/PgDn=light, \
         1/2/3=wireframe/raster/raytrace, M=lighting, N=ambient, T=textures, U/F=random triangle, \
         P=screenshot, Esc=quit"
    );

    let scene = build_scene(config)?;
    let context = build_context(config);
    let renderer = Renderer::new(width, height);
    let mut surface = WindowSurface::new("scanray", width, height)?;

    let dir = Path::new(&config.render.output)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    run_interactive(&mut surface, &scene, context, &renderer, &dir)?;
    Ok(())
}
