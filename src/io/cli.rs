use crate::io::config::Config;
use crate::pipeline::shading::LightingMode;
use crate::scene::context::RenderMode;
use clap::Parser;
use std::path::PathBuf;

/// Command-line overrides on top of the TOML config.
#[derive(Parser, Debug)]
#[command(name = "scanray")]
#[command(about = "Depth-buffered rasterizer and one-bounce ray tracer over the same triangle scene")]
pub struct Cli {
    /// Config file (TOML). Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// OBJ model to render instead of the configured one.
    #[arg(long, value_name = "FILE")]
    pub obj: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub mode: Option<RenderMode>,

    #[arg(short, long, value_enum)]
    pub lighting: Option<LightingMode>,

    /// Output image path.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Render an orbit sequence of N numbered frames next to the output path.
    #[arg(long, value_name = "N")]
    pub frames: Option<usize>,

    /// Open an interactive window (needs the `window` feature).
    #[arg(short, long)]
    pub window: bool,
}

impl Cli {
    /// Folds the flags that were given into `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(obj) = &self.obj {
            config.scene.obj = Some(obj.clone());
        }
        if let Some(mode) = self.mode {
            config.render.mode = mode;
        }
        if let Some(lighting) = self.lighting {
            config.render.lighting = lighting;
        }
        if let Some(output) = &self.output {
            config.render.output = output.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "scanray",
            "--mode",
            "raytraced",
            "--lighting",
            "combined-shadow",
            "-o",
            "out/frame.png",
            "--frames",
            "12",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.render.mode, RenderMode::Raytraced);
        assert_eq!(config.render.lighting, LightingMode::CombinedShadow);
        assert_eq!(config.render.output, "out/frame.png");
        assert_eq!(cli.frames, Some(12));
        assert!(!cli.window);
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["scanray"]);
        let mut config = Config::default();
        config.render.lighting = LightingMode::Phong;
        cli.apply(&mut config);
        assert_eq!(config.render.lighting, LightingMode::Phong);
        assert_eq!(config.render.output, "output.png");
    }
}
