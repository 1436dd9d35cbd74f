use clap::Parser;
use log::{error, info};
use scanray::app;
use scanray::io::cli::Cli;
use scanray::io::config::Config;
use std::time::Instant;

fn main() -> Result<(), String> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .filter_module("minifb", log::LevelFilter::Warn)
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::load(path).map_err(|e| {
                error!("{e}");
                e.to_string()
            })?
        }
        None => {
            info!("No config given, using defaults.");
            Config::default()
        }
    };
    cli.apply(&mut config);

    let start_time = Instant::now();
    let result = if cli.window {
        run_window(&config)
    } else {
        app::run_cli(&config, cli.frames)
    };

    result.map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;
    info!("Total time: {:?}", start_time.elapsed());
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(config: &Config) -> scanray::Result<()> {
    app::run_window(config)
}

#[cfg(not(feature = "window"))]
fn run_window(_config: &Config) -> scanray::Result<()> {
    Err(scanray::RenderError::Display(
        "built without the `window` feature".to_string(),
    ))
}
