//! Measured text blocks.
//!
//! Metrics are approximate: a line is as wide as its character count times the
//! font size times a weight-dependent factor, and each line is 1.2 font sizes
//! tall.

use crate::error::{RenderResult, RendererError};
use kurbo::{Point, Size};
use slidekit_core::{Markup, SerializableColor};

/// Font size used when the markup does not set one.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Heavy,
}

impl FontWeight {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" | "ultralight" | "thin" => FontWeight::Light,
            "bold" | "heavy" | "ultrabold" | "black" => FontWeight::Heavy,
            _ => FontWeight::Regular,
        }
    }

    /// Average character width as a fraction of the font size.
    fn char_width_factor(self) -> f64 {
        match self {
            FontWeight::Light => 0.50,
            FontWeight::Regular => 0.55,
            FontWeight::Heavy => 0.60,
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            FontWeight::Light => "300",
            FontWeight::Regular => "normal",
            FontWeight::Heavy => "bold",
        }
    }
}

/// Horizontal alignment of lines inside a constrained width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A laid-out line: its text, top-left corner and width.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine<'a> {
    pub text: &'a str,
    pub origin: Point,
    pub width: f64,
}

/// A measured block of styled text, ready to be drawn by a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    lines: Vec<String>,
    font_size: f64,
    weight: FontWeight,
    font_family: Option<String>,
    color: SerializableColor,
    width: Option<f64>,
    alignment: Alignment,
}

impl TextLayout {
    /// Measure span markup.
    pub fn from_markup(markup: &str) -> RenderResult<Self> {
        let markup = Markup::parse(markup).map_err(|e| RendererError::Markup(e.to_string()))?;

        let font_size = match markup.attribute("size") {
            Some(size) => size
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|size| size.is_finite() && *size > 0.0)
                .ok_or_else(|| RendererError::Markup(format!("bad font size {size:?}")))?,
            None => DEFAULT_FONT_SIZE,
        };
        let color = match markup.attribute("foreground") {
            Some(color) => color
                .parse::<SerializableColor>()
                .map_err(|e| RendererError::Markup(e.to_string()))?,
            None => SerializableColor::black(),
        };
        let weight = markup
            .attribute("weight")
            .map(FontWeight::from_name)
            .unwrap_or_default();

        let mut lines: Vec<String> = markup.text.lines().map(str::to_string).collect();
        if lines.is_empty() || markup.text.ends_with('\n') {
            lines.push(String::new());
        }

        Ok(Self {
            lines,
            font_size,
            weight,
            font_family: markup.attribute("font_family").map(str::to_string),
            color,
            width: None,
            alignment: Alignment::Left,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Constrain the block to `width`; alignment is applied inside it.
    pub fn set_width(&mut self, width: f64) {
        self.width = Some(width);
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT
    }

    fn line_width(&self, line: &str) -> f64 {
        line.chars().count() as f64 * self.font_size * self.weight.char_width_factor()
    }

    /// Width of the widest line, ignoring any constrained width.
    pub fn natural_width(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| self.line_width(line))
            .fold(0.0, f64::max)
    }

    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height()
    }

    /// Measured size of the text itself.
    pub fn pixel_size(&self) -> Size {
        Size::new(self.natural_width(), self.height())
    }

    /// Lines positioned for drawing at `origin`.
    pub fn positioned_lines(&self, origin: Point) -> Vec<PositionedLine<'_>> {
        let box_width = self.width.unwrap_or_else(|| self.natural_width());
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let width = self.line_width(line);
                let offset = match self.alignment {
                    Alignment::Left => 0.0,
                    Alignment::Center => (box_width - width) / 2.0,
                    Alignment::Right => box_width - width,
                };
                PositionedLine {
                    text: line,
                    origin: Point::new(origin.x + offset, origin.y + i as f64 * self.line_height()),
                    width,
                }
            })
            .collect()
    }
}
