//! Flag annotation parameters.

use crate::color::SerializableColor;
use crate::markup::TextAttributes;
use serde::{Deserialize, Serialize};

/// Flag shape: a triangular pennant or a rectangular banner.
///
/// Any name other than `"triangle"` selects the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlagKind {
    Triangle,
    #[default]
    Rectangle,
}

impl FlagKind {
    pub fn from_name(name: &str) -> Self {
        if name == "triangle" {
            FlagKind::Triangle
        } else {
            FlagKind::Rectangle
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlagKind::Triangle => "triangle",
            FlagKind::Rectangle => "rectangle",
        }
    }

    /// Ratio between the text width and the default flag width.
    pub fn width_ratio(self) -> f64 {
        match self {
            FlagKind::Triangle => 1.5,
            FlagKind::Rectangle => 1.3,
        }
    }
}

impl From<String> for FlagKind {
    fn from(name: String) -> Self {
        FlagKind::from_name(&name)
    }
}

impl From<FlagKind> for String {
    fn from(kind: FlagKind) -> Self {
        kind.name().to_string()
    }
}

/// Partially specified flag style. Every unset entry is defaulted when the
/// flag is laid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagStyle {
    #[serde(rename = "flag_type")]
    pub kind: FlagKind,
    pub text: Option<String>,
    pub text_attributes: TextAttributes,
    pub pole_width: Option<f64>,
    pub pole_color: Option<SerializableColor>,
    pub flag_height: Option<f64>,
    pub flag_width: Option<f64>,
    pub flag_color: Option<SerializableColor>,
    pub flag_frame_width: Option<f64>,
    pub flag_frame_color: Option<SerializableColor>,
}

impl FlagStyle {
    pub fn new(kind: FlagKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_text_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.text_attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_pole(mut self, width: f64, color: SerializableColor) -> Self {
        self.pole_width = Some(width);
        self.pole_color = Some(color);
        self
    }

    pub fn with_flag_size(mut self, width: f64, height: f64) -> Self {
        self.flag_width = Some(width);
        self.flag_height = Some(height);
        self
    }

    pub fn with_flag_color(mut self, color: SerializableColor) -> Self {
        self.flag_color = Some(color);
        self
    }

    pub fn with_frame(mut self, width: f64, color: SerializableColor) -> Self {
        self.flag_frame_width = Some(width);
        self.flag_frame_color = Some(color);
        self
    }
}
