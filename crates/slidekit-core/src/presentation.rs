//! Presentation state: the slide sequence, the cursor and page geometry.

use crate::document::SlideDocument;
use crate::error::{CoreError, CoreResult};
use crate::page::Margins;
use crate::slides::{Element, Slide};
use crate::theme::{DEFAULT_THEME, Theme};
use kurbo::Size;
use std::path::{Path, PathBuf};

/// Default slide width in pixels.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Default slide height in pixels.
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Number of slide titles listed on one index slide.
pub const INDEX_ENTRIES_PER_SLIDE: usize = 8;

/// The presentation model a surface draws from.
///
/// The cursor is always a valid index into [`Presentation::slides`], or zero
/// when there are no slides.
#[derive(Debug, Clone)]
pub struct Presentation {
    title: String,
    slides: Vec<Slide>,
    index_slides: Vec<Slide>,
    current: usize,
    /// Cursor to return to when leaving index mode.
    index_return: usize,
    index_mode: bool,
    theme_name: String,
    width: f64,
    height: f64,
    source: Option<String>,
    /// Slide content margins.
    pub margins: Margins,
    /// Margins around the printable area of a page.
    pub page_margins: Margins,
    pub paper_width: Option<f64>,
    pub paper_height: Option<f64>,
    pub slides_per_page: Option<usize>,
    /// Where print output is written.
    pub filename: Option<PathBuf>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    /// Create an empty presentation with the default slide size and theme.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            slides: Vec::new(),
            index_slides: Vec::new(),
            current: 0,
            index_return: 0,
            index_mode: false,
            theme_name: DEFAULT_THEME.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            source: None,
            margins: Margins::default(),
            page_margins: Margins::default(),
            paper_width: None,
            paper_height: None,
            slides_per_page: None,
            filename: None,
        }
    }

    /// Build a presentation from a JSON source, applying the theme the
    /// document asks for.
    pub fn from_source(source: &str) -> CoreResult<Self> {
        let mut presentation = Self::new();
        presentation.reingest_source(source)?;
        let theme = SlideDocument::from_json(source)?.theme;
        if let Some(theme) = theme {
            presentation.apply_theme(&theme)?;
        }
        Ok(presentation)
    }

    /// Load a presentation from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        log::info!("Loaded slide source from {:?}", path);
        Self::from_source(&source)
    }

    /// Replace the slide content with the content of `source`.
    ///
    /// The theme and geometry settings are left alone; the cursor is clamped
    /// so it stays valid.
    pub fn reingest_source(&mut self, source: &str) -> CoreResult<()> {
        let document = SlideDocument::from_json(source)?;
        self.title = document.title;
        self.slides = document.slides;
        self.source = Some(source.to_string());
        if self.index_mode {
            self.index_slides = build_index_slides(&self.slides);
            self.index_return = self.index_return.min(self.slides.len().saturating_sub(1));
        }
        self.current = self.current.min(self.slide_count().saturating_sub(1));
        Ok(())
    }

    /// The raw source last ingested.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Slides currently on display: the index slides in index mode, the
    /// content slides otherwise.
    pub fn slides(&self) -> &[Slide] {
        if self.index_mode {
            &self.index_slides
        } else {
            &self.slides
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides().len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides().get(self.current)
    }

    /// Move the cursor to `index` if it names a slide.
    pub fn move_to_if_can(&mut self, index: usize) -> bool {
        if index < self.slide_count() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// The applied theme's settings.
    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.theme_name).unwrap_or_default()
    }

    /// Apply a built-in theme by name.
    pub fn apply_theme(&mut self, name: &str) -> CoreResult<()> {
        if Theme::by_name(name).is_none() {
            return Err(CoreError::UnknownTheme(name.to_string()));
        }
        self.theme_name = name.to_string();
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Slide size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Explicit paper size, only when both dimensions are set.
    pub fn paper_size(&self) -> Option<Size> {
        match (self.paper_width, self.paper_height) {
            (Some(width), Some(height)) => Some(Size::new(width, height)),
            _ => None,
        }
    }

    pub fn is_index_mode(&self) -> bool {
        self.index_mode
    }

    /// Switch between the content slides and the generated index slides.
    pub fn toggle_index_mode(&mut self) {
        if self.index_mode {
            self.index_mode = false;
            self.current = self.index_return.min(self.slides.len().saturating_sub(1));
        } else {
            self.index_slides = build_index_slides(&self.slides);
            self.index_return = self.current;
            self.index_mode = true;
            self.current = self.current / INDEX_ENTRIES_PER_SLIDE;
            self.current = self.current.min(self.index_slides.len().saturating_sub(1));
        }
    }
}

fn build_index_slides(slides: &[Slide]) -> Vec<Slide> {
    let pages = slides.len().div_ceil(INDEX_ENTRIES_PER_SLIDE);
    slides
        .chunks(INDEX_ENTRIES_PER_SLIDE)
        .enumerate()
        .map(|(page, chunk)| {
            let items = chunk.iter().enumerate().map(|(offset, slide)| {
                if slide.title.is_empty() {
                    format!("Slide {}", page * INDEX_ENTRIES_PER_SLIDE + offset + 1)
                } else {
                    slide.title.clone()
                }
            });
            Slide::new(format!("Index {}/{}", page + 1, pages))
                .with_element(Element::enum_list(items))
        })
        .collect()
}
