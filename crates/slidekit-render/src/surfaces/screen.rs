//! The live, interactive surface.
//!
//! Drawing is recorded as a display list for the current slide; a windowing
//! layer replays it when a repaint has been requested.

use crate::error::RenderResult;
use crate::surface::{DrawCommand, Surface};
use crate::text::TextLayout;
use kurbo::{Point, Rect, Size};
use peniko::Color;

/// Live view surface recording one display list per slide.
#[derive(Debug, Clone)]
pub struct ScreenSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    frames: usize,
    needs_repaint: bool,
}

impl ScreenSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
            needs_repaint: false,
        }
    }

    /// Resize the view (e.g. after a window resize).
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Display list of the slide drawn last.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of slides drawn so far.
    pub fn frames_drawn(&self) -> usize {
        self.frames
    }

    /// Returns whether a repaint was requested, clearing the request.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl Surface for ScreenSurface {
    fn kind(&self) -> &'static str {
        "screen"
    }

    fn size(&self) -> Size {
        self.size
    }

    fn begin_slide(&mut self) -> RenderResult<()> {
        self.commands.clear();
        Ok(())
    }

    fn end_slide(&mut self) -> RenderResult<()> {
        self.frames += 1;
        self.needs_repaint = true;
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) -> RenderResult<()> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn draw_filled_polygon(&mut self, points: &[Point], color: Color) -> RenderResult<()> {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
        Ok(())
    }

    fn draw_text_layout(&mut self, layout: &TextLayout, origin: Point) -> RenderResult<()> {
        self.commands.push(DrawCommand::Text {
            layout: layout.clone(),
            origin,
        });
        Ok(())
    }

    fn redraw(&mut self) -> RenderResult<()> {
        log::debug!("Repaint requested for {} commands", self.commands.len());
        self.needs_repaint = true;
        Ok(())
    }
}
