//! Paginated print surface.
//!
//! Slides are tiled top to bottom, `slides_per_page` to a page, each scaled to
//! fit its cell inside the page margins. Finished pages are SVG documents.

use crate::error::{RenderResult, RendererError};
use crate::surface::{Capabilities, PageSetup, Surface};
use crate::text::TextLayout;
use kurbo::{Point, Rect, Size};
use log::{debug, info};
use peniko::Color;
use slidekit_core::SerializableColor;
use std::path::PathBuf;
use svg::node::element as svg_element;

/// Print surface producing one SVG document per page.
pub struct PrintSurface {
    setup: PageSetup,
    pages: Vec<svg::Document>,
    page_cells: Vec<svg_element::Group>,
    cell: Option<svg_element::Group>,
    written: Vec<PathBuf>,
    /// Set by `finish`; the next slide starts a new print pass.
    finished: bool,
}

fn fill_attributes(color: Color) -> (String, f64) {
    let color = SerializableColor::from(color);
    let opaque = SerializableColor { a: 255, ..color };
    (opaque.to_hex(), color.a as f64 / 255.0)
}

impl PrintSurface {
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            page_cells: Vec::new(),
            cell: None,
            written: Vec::new(),
            finished: false,
        }
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    /// Pages of the current or last finished print pass.
    pub fn pages(&self) -> &[svg::Document] {
        &self.pages
    }

    /// Files written by the last [`Surface::finish`].
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    /// Scale and offset placing slide coordinates into cell `index` of a page.
    pub fn cell_transform(&self, index: usize) -> (f64, Point) {
        let setup = &self.setup;
        let margins = setup.page_margins;
        let per_page = setup.slides_per_page.max(1);
        let content_width = (setup.paper.width - margins.horizontal()).max(0.0);
        let content_height = (setup.paper.height - margins.vertical()).max(0.0);
        let cell_height = content_height / per_page as f64;

        let slide = setup.slide_size;
        let scale = if slide.width > 0.0 && slide.height > 0.0 {
            (content_width / slide.width).min(cell_height / slide.height)
        } else {
            1.0
        };
        let offset = Point::new(
            margins.left() + (content_width - slide.width * scale) / 2.0,
            margins.top() + index as f64 * cell_height + (cell_height - slide.height * scale) / 2.0,
        );
        (scale, offset)
    }

    fn push(&mut self, node: impl Into<Box<dyn svg::Node>>) -> RenderResult<()> {
        let cell = self
            .cell
            .take()
            .ok_or_else(|| RendererError::Surface("drawing outside of a slide".to_string()))?;
        self.cell = Some(cell.add(node));
        Ok(())
    }

    fn flush_page(&mut self) {
        if self.page_cells.is_empty() {
            return;
        }
        let paper = self.setup.paper;
        let mut document = svg::Document::new()
            .set("viewBox", format!("0 0 {} {}", paper.width, paper.height))
            .set("width", paper.width)
            .set("height", paper.height);
        for cell in self.page_cells.drain(..) {
            document = document.add(cell);
        }
        self.pages.push(document);
        debug!("Print page {} complete", self.pages.len());
    }

    fn page_path(output: &PathBuf, page: usize, total: usize) -> PathBuf {
        if total == 1 {
            return output.clone();
        }
        let stem = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "page".to_string());
        let extension = output
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_else(|| "svg".to_string());
        output.with_file_name(format!("{stem}-{:03}.{extension}", page + 1))
    }
}

impl Surface for PrintSurface {
    fn kind(&self) -> &'static str {
        "print"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::PRINT
    }

    fn size(&self) -> Size {
        self.setup.slide_size
    }

    fn begin_slide(&mut self) -> RenderResult<()> {
        if self.finished {
            self.finished = false;
            self.pages.clear();
            self.written.clear();
        }
        if self.page_cells.len() >= self.setup.slides_per_page.max(1) {
            self.flush_page();
        }
        let (scale, offset) = self.cell_transform(self.page_cells.len());
        self.cell = Some(svg_element::Group::new().set(
            "transform",
            format!("translate({}, {}) scale({})", offset.x, offset.y, scale),
        ));
        Ok(())
    }

    fn end_slide(&mut self) -> RenderResult<()> {
        let cell = self
            .cell
            .take()
            .ok_or_else(|| RendererError::Surface("end_slide without begin_slide".to_string()))?;
        self.page_cells.push(cell);
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }
        let (fill, opacity) = fill_attributes(color);
        self.push(
            svg_element::Rectangle::new()
                .set("x", rect.x0)
                .set("y", rect.y0)
                .set("width", rect.width())
                .set("height", rect.height())
                .set("fill", fill)
                .set("fill-opacity", opacity),
        )
    }

    fn draw_filled_polygon(&mut self, points: &[Point], color: Color) -> RenderResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let (fill, opacity) = fill_attributes(color);
        let points = points
            .iter()
            .map(|point| format!("{},{}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.push(
            svg_element::Polygon::new()
                .set("points", points)
                .set("fill", fill)
                .set("fill-opacity", opacity),
        )
    }

    fn draw_text_layout(&mut self, layout: &TextLayout, origin: Point) -> RenderResult<()> {
        let color = layout.color();
        for line in layout.positioned_lines(origin) {
            if line.text.is_empty() {
                continue;
            }
            let mut text = svg_element::Text::new(line.text)
                .set("x", line.origin.x)
                .set("y", line.origin.y + layout.font_size())
                .set("font-size", layout.font_size())
                .set("font-weight", layout.weight().css_name())
                .set("fill", color.to_hex());
            if let Some(family) = layout.font_family() {
                text = text.set("font-family", family);
            }
            self.push(text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<()> {
        if let Some(cell) = self.cell.take() {
            self.page_cells.push(cell);
        }
        self.flush_page();
        self.finished = true;
        self.written.clear();

        let Some(output) = self.setup.output.clone() else {
            return Ok(());
        };
        let total = self.pages.len();
        for (index, page) in self.pages.iter().enumerate() {
            let path = Self::page_path(&output, index, total);
            svg::save(&path, page)?;
            self.written.push(path);
        }
        info!("Printed {} pages to {:?}", total, output);
        Ok(())
    }
}
