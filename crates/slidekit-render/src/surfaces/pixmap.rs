//! Offscreen raster surface.
//!
//! Shapes are filled by sampling pixel centers. Text is greeked: each line
//! becomes a translucent bar, which is enough for thumbnails and caches.

use crate::error::{RenderResult, RendererError};
use crate::surface::{Capabilities, Surface};
use crate::text::TextLayout;
use image::{Rgba, RgbaImage};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};
use peniko::Color;
use slidekit_core::SerializableColor;

/// Offscreen RGBA pixmap.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    size: Size,
    image: RgbaImage,
}

impl PixmapSurface {
    /// Create a pixmap covering `size`, rounded up to whole pixels.
    pub fn new(size: Size) -> RenderResult<Self> {
        if !size.width.is_finite()
            || !size.height.is_finite()
            || size.width < 1.0
            || size.height < 1.0
        {
            return Err(RendererError::InitFailed(format!(
                "pixmap size {}x{} is not drawable",
                size.width, size.height
            )));
        }
        let width = size.width.ceil() as u32;
        let height = size.height.ceil() as u32;
        Ok(Self {
            size,
            image: RgbaImage::new(width, height),
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel rows or columns whose centers fall in `[start, end)`.
    fn pixel_span(start: f64, end: f64, limit: u32) -> std::ops::Range<u32> {
        let first = (start - 0.5).ceil().max(0.0);
        let last = (end - 0.5).ceil().max(0.0);
        let first = (first as u32).min(limit);
        let last = (last as u32).min(limit);
        first..last.max(first)
    }

    fn blend(&mut self, x: u32, y: u32, color: SerializableColor) {
        let pixel = self.image.get_pixel_mut(x, y);
        let src_a = color.a as u32;
        if src_a == 255 {
            *pixel = Rgba([color.r, color.g, color.b, 255]);
            return;
        }
        let dst_a = pixel[3] as u32;
        let inv = 255 - src_a;
        let out_a = src_a + dst_a * inv / 255;
        if out_a == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
            return;
        }
        let channel = |src: u8, dst: u8| -> u8 {
            ((src as u32 * src_a + dst as u32 * dst_a * inv / 255) / out_a) as u8
        };
        *pixel = Rgba([
            channel(color.r, pixel[0]),
            channel(color.g, pixel[1]),
            channel(color.b, pixel[2]),
            out_a as u8,
        ]);
    }

    fn fill(&mut self, rect: Rect, color: SerializableColor) {
        let xs = Self::pixel_span(rect.x0, rect.x1, self.image.width());
        let ys = Self::pixel_span(rect.y0, rect.y1, self.image.height());
        for y in ys {
            for x in xs.clone() {
                self.blend(x, y, color);
            }
        }
    }
}

impl Surface for PixmapSurface {
    fn kind(&self) -> &'static str {
        "pixmap"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RASTER
    }

    fn size(&self) -> Size {
        self.size
    }

    fn begin_slide(&mut self) -> RenderResult<()> {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()> {
        self.fill(rect, color.into());
        Ok(())
    }

    fn draw_filled_polygon(&mut self, points: &[Point], color: Color) -> RenderResult<()> {
        let [first, rest @ ..] = points else {
            return Ok(());
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        path.close_path();

        let color = SerializableColor::from(color);
        let bounds = path.bounding_box();
        let xs = Self::pixel_span(bounds.x0, bounds.x1, self.image.width());
        let ys = Self::pixel_span(bounds.y0, bounds.y1, self.image.height());
        for y in ys {
            for x in xs.clone() {
                if path.contains(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.blend(x, y, color);
                }
            }
        }
        Ok(())
    }

    fn draw_text_layout(&mut self, layout: &TextLayout, origin: Point) -> RenderResult<()> {
        let mut color = layout.color();
        color.a = (color.a as u16 * 2 / 5) as u8;
        let size = layout.font_size();
        for line in layout.positioned_lines(origin) {
            let bar = Rect::new(
                line.origin.x,
                line.origin.y + size * 0.35,
                line.origin.x + line.width,
                line.origin.y + size * 0.85,
            );
            self.fill(bar, color);
        }
        Ok(())
    }

    fn snapshot(&mut self) -> RenderResult<RgbaImage> {
        Ok(self.image.clone())
    }
}
