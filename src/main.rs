use log::{error, info, LevelFilter};
use std::error::Error;

mod app;
mod config;
mod core;
mod game;
mod ui;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Logging Setup ---
    // RUST_LOG still wins over these defaults.
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("taptrainer::core::gfx", LevelFilter::Warn)
        .filter_module("taptrainer::game", LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Tap-trainer starting...");

    if let Err(e) = app::run() {
        error!("Tap-trainer exited with error: {}", e);
        return Err(e);
    }

    info!("Tap-trainer exited gracefully.");
    Ok(())
}
