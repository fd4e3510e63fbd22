//! Built-in themes.
//!
//! A theme is a named bundle of colors and text sizes the slide painter reads.
//! Theme scripting is not modelled; only the named settings are.

use crate::color::SerializableColor;

/// Name of the theme used when none is applied.
pub const DEFAULT_THEME: &str = "default";

/// Visual settings a theme supplies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: SerializableColor,
    pub foreground: SerializableColor,
    pub accent: SerializableColor,
    /// Title font size in pixels.
    pub title_size: f64,
    /// Body font size in pixels.
    pub body_size: f64,
}

const THEMES: &[Theme] = &[
    Theme {
        name: DEFAULT_THEME,
        background: SerializableColor::white(),
        foreground: SerializableColor::black(),
        accent: SerializableColor::new(59, 130, 246, 255),
        title_size: 40.0,
        body_size: 24.0,
    },
    Theme {
        name: "night",
        background: SerializableColor::new(24, 24, 32, 255),
        foreground: SerializableColor::new(230, 230, 230, 255),
        accent: SerializableColor::new(250, 204, 21, 255),
        title_size: 40.0,
        body_size: 24.0,
    },
    Theme {
        name: "clear-blue",
        background: SerializableColor::new(240, 248, 255, 255),
        foreground: SerializableColor::new(0, 0, 128, 255),
        accent: SerializableColor::new(30, 144, 255, 255),
        title_size: 44.0,
        body_size: 26.0,
    },
];

impl Theme {
    /// Look up a built-in theme.
    pub fn by_name(name: &str) -> Option<Theme> {
        THEMES.iter().find(|theme| theme.name == name).copied()
    }

    /// Names of all built-in themes.
    pub fn names() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|theme| theme.name)
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}
