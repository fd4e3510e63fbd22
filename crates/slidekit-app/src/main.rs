//! Main application entry point.

use slidekit_app::{AppConfig, run};
use std::path::Path;

fn main() {
    env_logger::init();
    log::info!("Starting SlideKit");

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    match run(&config) {
        Ok(summary) => log::info!(
            "Printed {} slides, wrote {} images",
            summary.printed,
            summary.images.len()
        ),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
