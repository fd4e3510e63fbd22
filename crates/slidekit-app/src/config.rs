//! Application configuration.

use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use slidekit_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Margins};
use std::path::{Path, PathBuf};

/// Application configuration, read from a JSON file.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Slide source document.
    pub deck: PathBuf,
    pub width: f64,
    pub height: f64,
    /// Built-in theme overriding the deck's own.
    pub theme: Option<String>,
    pub margins: Margins,
    pub page_margins: Margins,
    pub paper_width: Option<f64>,
    pub paper_height: Option<f64>,
    pub slides_per_page: Option<usize>,
    /// Print output; no printing when unset.
    pub print_output: Option<PathBuf>,
    /// Directory for per-slide PNGs; no export when unset.
    pub image_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "SlideKit".to_string(),
            deck: PathBuf::from("slides.json"),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            theme: None,
            margins: Margins::uniform(40.0),
            page_margins: Margins::uniform(36.0),
            paper_width: None,
            paper_height: None,
            slides_per_page: None,
            print_output: Some(PathBuf::from("slides.svg")),
            image_dir: Some(PathBuf::from("slides")),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file. Relative paths in it are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut config = Self::from_json(&std::fs::read_to_string(path)?)?;
        if let Some(base) = path.parent() {
            config.deck = base.join(&config.deck);
            config.print_output = config.print_output.map(|output| base.join(output));
            config.image_dir = config.image_dir.map(|dir| base.join(dir));
        }
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config =
            AppConfig::from_json(r#"{"deck": "talk.json", "slides_per_page": 4}"#).unwrap();
        assert_eq!(config.deck, PathBuf::from("talk.json"));
        assert_eq!(config.slides_per_page, Some(4));
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.print_output, Some(PathBuf::from("slides.svg")));
    }

    #[test]
    fn test_outputs_can_be_disabled() {
        let config = AppConfig::from_json(r#"{"print_output": null, "image_dir": null}"#).unwrap();
        assert!(config.print_output.is_none());
        assert!(config.image_dir.is_none());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slidekit.json");
        std::fs::write(&path, r#"{"deck": "deck.json", "image_dir": "png"}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.deck, dir.path().join("deck.json"));
        assert_eq!(config.image_dir, Some(dir.path().join("png")));
        assert_eq!(config.print_output, Some(dir.path().join("slides.svg")));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(AppConfig::from_json("{deck").is_err());
    }
}
