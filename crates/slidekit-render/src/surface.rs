//! Drawing surface abstraction.

use crate::error::{RenderResult, RendererError};
use crate::surfaces::{PixmapSurface, PrintSurface};
use crate::text::TextLayout;
use image::RgbaImage;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use slidekit_core::Margins;
use std::path::PathBuf;

/// What a surface can do without handing the work to a cloned stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Can satisfy a print request directly.
    pub printable: bool,
    /// Can export pixel images directly.
    pub raster: bool,
}

impl Capabilities {
    pub const PRINT: Self = Self {
        printable: true,
        raster: false,
    };

    pub const RASTER: Self = Self {
        printable: false,
        raster: true,
    };
}

/// A single recorded drawing command.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    FillPolygon { points: Vec<Point>, color: Color },
    Text { layout: TextLayout, origin: Point },
}

/// Trait for drawing targets.
///
/// Slides are framed by [`Surface::begin_slide`] and [`Surface::end_slide`];
/// everything drawn in between belongs to one slide.
pub trait Surface {
    /// Short name used in log output.
    fn kind(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Drawing area in slide coordinates.
    fn size(&self) -> Size;

    fn begin_slide(&mut self) -> RenderResult<()> {
        Ok(())
    }

    fn end_slide(&mut self) -> RenderResult<()> {
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()>;

    fn draw_filled_polygon(&mut self, points: &[Point], color: Color) -> RenderResult<()>;

    /// Draw a measured text block with its top-left corner at `origin`.
    fn draw_text_layout(&mut self, layout: &TextLayout, origin: Point) -> RenderResult<()>;

    /// Measure span markup.
    fn measure_text(&self, markup: &str) -> RenderResult<TextLayout> {
        TextLayout::from_markup(markup)
    }

    /// Pixel image of the last drawn slide.
    fn snapshot(&mut self) -> RenderResult<RgbaImage> {
        Err(RendererError::Unsupported(format!(
            "{} surface cannot produce raster images",
            self.kind()
        )))
    }

    /// Flush pending output.
    fn finish(&mut self) -> RenderResult<()> {
        Ok(())
    }

    /// Repaint the live view.
    fn redraw(&mut self) -> RenderResult<()> {
        Ok(())
    }

    fn is_printable(&self) -> bool {
        self.capabilities().printable
    }

    fn can_produce_raster(&self) -> bool {
        self.capabilities().raster
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn size(&self) -> Size {
        (**self).size()
    }

    fn begin_slide(&mut self) -> RenderResult<()> {
        (**self).begin_slide()
    }

    fn end_slide(&mut self) -> RenderResult<()> {
        (**self).end_slide()
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()> {
        (**self).draw_filled_rect(rect, color)
    }

    fn draw_filled_polygon(&mut self, points: &[Point], color: Color) -> RenderResult<()> {
        (**self).draw_filled_polygon(points, color)
    }

    fn draw_text_layout(&mut self, layout: &TextLayout, origin: Point) -> RenderResult<()> {
        (**self).draw_text_layout(layout, origin)
    }

    fn measure_text(&self, markup: &str) -> RenderResult<TextLayout> {
        (**self).measure_text(markup)
    }

    fn snapshot(&mut self) -> RenderResult<RgbaImage> {
        (**self).snapshot()
    }

    fn finish(&mut self) -> RenderResult<()> {
        (**self).finish()
    }

    fn redraw(&mut self) -> RenderResult<()> {
        (**self).redraw()
    }

    fn is_printable(&self) -> bool {
        (**self).is_printable()
    }

    fn can_produce_raster(&self) -> bool {
        (**self).can_produce_raster()
    }
}

/// Page configuration for a paginated surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    /// Paper size.
    pub paper: Size,
    /// Margins around the printable area.
    pub page_margins: Margins,
    /// Slides tiled on each page, top to bottom.
    pub slides_per_page: usize,
    /// Size of one slide in slide coordinates.
    pub slide_size: Size,
    /// Where finished pages are written.
    pub output: Option<PathBuf>,
}

impl PageSetup {
    pub fn new(paper: Size, slide_size: Size) -> Self {
        Self {
            paper,
            page_margins: Margins::default(),
            slides_per_page: 1,
            slide_size,
            output: None,
        }
    }

    pub fn with_page_margins(mut self, margins: Margins) -> Self {
        self.page_margins = margins;
        self
    }

    pub fn with_slides_per_page(mut self, slides_per_page: usize) -> Self {
        self.slides_per_page = slides_per_page.max(1);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

/// Builds the secondary surfaces that cloned stages draw onto.
pub trait SurfaceFactory {
    /// A surface that can satisfy print requests.
    fn printable(&self, setup: PageSetup) -> RenderResult<Box<dyn Surface>>;

    /// An offscreen surface that can produce raster images.
    fn offscreen(&self, size: Size) -> RenderResult<Box<dyn Surface>>;
}

/// Builds [`PrintSurface`]s and [`PixmapSurface`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSurfaceFactory;

impl SurfaceFactory for DefaultSurfaceFactory {
    fn printable(&self, setup: PageSetup) -> RenderResult<Box<dyn Surface>> {
        Ok(Box::new(PrintSurface::new(setup)))
    }

    fn offscreen(&self, size: Size) -> RenderResult<Box<dyn Surface>> {
        Ok(Box::new(PixmapSurface::new(size)?))
    }
}
