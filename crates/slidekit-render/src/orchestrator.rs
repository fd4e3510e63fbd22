//! Traversals of a presentation across output targets.
//!
//! Printing, caching and raster export all walk the slide sequence. When the
//! live surface cannot serve the request itself, the walk runs on a clone of
//! the presentation bound to a secondary surface from the stage's
//! [`SurfaceFactory`](crate::surface::SurfaceFactory). Clones live for one
//! call only.

use crate::error::RenderResult;
use crate::stage::{DynStage, Stage};
use crate::surface::{PageSetup, Surface};
use image::RgbaImage;
use kurbo::Size;
use log::{debug, info};
use std::iter::FusedIterator;

/// Optional progress callbacks for a traversal.
#[derive(Default)]
pub struct TraversalHooks<'a> {
    before: Option<Box<dyn FnMut(Size) + 'a>>,
    each: Option<Box<dyn FnMut(usize) + 'a>>,
    after: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> TraversalHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once before the first slide with the target's slide size.
    pub fn before(mut self, hook: impl FnMut(Size) + 'a) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Called with each slide index as it is processed.
    pub fn each(mut self, hook: impl FnMut(usize) + 'a) -> Self {
        self.each = Some(Box::new(hook));
        self
    }

    /// Called once after the last slide.
    pub fn after(mut self, hook: impl FnOnce() + 'a) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    fn fire_before(&mut self, size: Size) {
        if let Some(hook) = self.before.as_mut() {
            hook(size);
        }
    }

    fn fire_each(&mut self, index: usize) {
        if let Some(hook) = self.each.as_mut() {
            hook(index);
        }
    }

    fn fire_after(&mut self) {
        if let Some(hook) = self.after.take() {
            hook();
        }
    }
}

impl<S: Surface> Stage<S> {
    /// Draw every slide in order on a printable surface and flush the output.
    ///
    /// A printable live surface is drawn on directly and its cursor is left on
    /// the last slide. Otherwise the pass runs on a print clone configured
    /// from the live margins, paper size and slides per page.
    pub fn print(&mut self, hooks: TraversalHooks<'_>) -> RenderResult<()> {
        info!(
            "Printing {} slides from {} surface",
            self.slide_count(),
            self.surface().kind()
        );
        if self.surface().is_printable() {
            return print_stage(self, hooks);
        }
        let mut clone = self.printable_clone()?;
        print_stage(&mut clone, hooks)
    }

    /// Draw every slide on an offscreen clone.
    ///
    /// `each` runs after each slide with its index and the clone; `done`
    /// receives the clone once all slides are drawn.
    pub fn cache_all_slides<F, D>(&self, each: F, done: D) -> RenderResult<()>
    where
        F: FnMut(usize, &mut DynStage) -> RenderResult<()>,
        D: FnOnce(DynStage) -> RenderResult<()>,
    {
        self.cache_all_slides_with(|_| {}, each, done)
    }

    /// Like [`Stage::cache_all_slides`], calling `before` with the clone's
    /// slide size ahead of the first slide.
    pub fn cache_all_slides_with<B, F, D>(
        &self,
        before: B,
        mut each: F,
        done: D,
    ) -> RenderResult<()>
    where
        B: FnOnce(Size),
        F: FnMut(usize, &mut DynStage) -> RenderResult<()>,
        D: FnOnce(DynStage) -> RenderResult<()>,
    {
        info!("Caching {} slides", self.slide_count());
        let mut clone = self.offscreen_clone()?;
        before(clone.slide_size());
        for index in 0..clone.slide_count() {
            clone.move_to_if_can(index);
            clone.draw_current()?;
            each(index, &mut clone)?;
        }
        debug!("Cached {} slides", clone.slide_count());
        done(clone)
    }

    /// One raster image per slide, in order.
    pub fn each_slide_pixbuf(&mut self) -> RenderResult<SlidePixbufs<'_, S>> {
        self.each_slide_pixbuf_with(TraversalHooks::default())
    }

    /// Like [`Stage::each_slide_pixbuf`], reporting progress through `hooks`.
    ///
    /// The live cursor is put back where it was once the sequence is drained
    /// or dropped.
    pub fn each_slide_pixbuf_with<'a>(
        &'a mut self,
        mut hooks: TraversalHooks<'a>,
    ) -> RenderResult<SlidePixbufs<'a, S>> {
        let clone = if self.surface().can_produce_raster() {
            None
        } else {
            Some(self.offscreen_clone()?)
        };
        let count = match &clone {
            Some(clone) => clone.slide_count(),
            None => self.slide_count(),
        };
        debug!(
            "Exporting {} slides from {} surface",
            count,
            if clone.is_some() { "offscreen" } else { self.surface().kind() }
        );
        hooks.fire_before(self.slide_size());
        Ok(SlidePixbufs {
            previous_index: self.current_index(),
            live: self,
            clone,
            next: 0,
            count,
            hooks,
            finished: false,
            restored: false,
        })
    }

    /// Ask the live surface to repaint.
    pub fn redraw(&mut self) -> RenderResult<()> {
        self.surface_mut().redraw()
    }

    fn printable_clone(&self) -> RenderResult<DynStage> {
        let live = self.presentation();
        let paper = live.paper_size().unwrap_or_else(|| self.surface().size());
        let slides_per_page = live.slides_per_page.unwrap_or(1);
        let setup = PageSetup::new(paper, live.size())
            .with_page_margins(live.page_margins)
            .with_slides_per_page(slides_per_page)
            .with_output(live.filename.clone());
        let surface = self.factory().printable(setup)?;
        self.clone_with(surface, |presentation| {
            presentation.filename = live.filename.clone();
            presentation.margins = live.margins;
            presentation.page_margins = live.page_margins;
            presentation.paper_width = Some(paper.width);
            presentation.paper_height = Some(paper.height);
            presentation.slides_per_page = Some(slides_per_page);
            presentation.set_size(live.width(), live.height());
        })
    }

    fn offscreen_clone(&self) -> RenderResult<DynStage> {
        let size = self.surface().size();
        let surface = self.factory().offscreen(size)?;
        self.clone_with(surface, |presentation| presentation.set_size(size.width, size.height))
    }
}

fn print_stage<T: Surface>(
    stage: &mut Stage<T>,
    mut hooks: TraversalHooks<'_>,
) -> RenderResult<()> {
    hooks.fire_before(stage.slide_size());
    for index in 0..stage.slide_count() {
        stage.move_to_if_can(index);
        stage.draw_current()?;
        hooks.fire_each(index);
    }
    stage.surface_mut().finish()?;
    debug!("Printed {} slides", stage.slide_count());
    hooks.fire_after();
    Ok(())
}

/// Lazy per-slide raster export, created by [`Stage::each_slide_pixbuf`].
///
/// Yields `(image, index)` for every slide. A failed export ends the
/// sequence. The live cursor is restored exactly once, when the sequence
/// ends or is dropped; the `after` hook runs only when it is drained.
pub struct SlidePixbufs<'a, S: Surface> {
    live: &'a mut Stage<S>,
    clone: Option<DynStage>,
    previous_index: usize,
    next: usize,
    count: usize,
    hooks: TraversalHooks<'a>,
    finished: bool,
    restored: bool,
}

impl<S: Surface> SlidePixbufs<'_, S> {
    /// Whether the export runs on a clone rather than the live surface.
    pub fn uses_clone(&self) -> bool {
        self.clone.is_some()
    }

    fn restore(&mut self) {
        if !self.restored {
            self.restored = true;
            self.live.move_to_if_can(self.previous_index);
            debug!("Restored cursor to slide {}", self.previous_index);
        }
    }
}

impl<S: Surface> Iterator for SlidePixbufs<'_, S> {
    type Item = RenderResult<(RgbaImage, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.next >= self.count {
            self.finished = true;
            self.restore();
            self.hooks.fire_after();
            return None;
        }

        let index = self.next;
        self.next += 1;
        self.hooks.fire_each(index);
        let result = match self.clone.as_mut() {
            Some(clone) => clone.export_raster(index),
            None => self.live.export_raster(index),
        };
        match result {
            Ok(image) => Some(Ok((image, index))),
            Err(e) => {
                self.finished = true;
                self.restore();
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished { 0 } else { self.count - self.next };
        (0, Some(remaining))
    }
}

impl<S: Surface> FusedIterator for SlidePixbufs<'_, S> {}

impl<S: Surface> Drop for SlidePixbufs<'_, S> {
    fn drop(&mut self) {
        self.restore();
    }
}
