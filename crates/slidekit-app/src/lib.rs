//! SlideKit Application
//!
//! Headless driver: loads a deck, prints it and exports one image per slide.

mod config;
mod error;
mod export;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use export::{RunSummary, encode_png, run};
