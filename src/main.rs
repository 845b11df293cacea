use anyhow::{Context, Result};
use log::{info, log};
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::process;

use triangle::{app, config::AppConfig, platform::DesktopWindowSystem, AppError};

fn load_config() -> std::result::Result<(AppConfig, Option<PathBuf>), AppError> {
    Ok(AppConfig::load()?)
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let level = config.log_level()?;
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to install logger")?;
    Ok(())
}

fn main() {
    let (config, config_path) = match load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(-1);
    }
    info!("Initializing application...");
    if let Some(path) = &config_path {
        info!("Loaded config from {}", path.display());
    }

    let mut system = DesktopWindowSystem::new();
    let result = app::run(&mut system, &config);
    match &result {
        Ok(stats) => info!("Rendered {} frames", stats.frames),
        Err(e) => log!(app::failure_level(e), "{}", e),
    }

    process::exit(app::exit_code(&result));
}
