//! A presentation bound to the surface it draws on.

use crate::error::{RenderResult, RendererError};
use crate::flag;
use crate::painter::draw_slide;
use crate::surface::{DefaultSurfaceFactory, Surface, SurfaceFactory};
use image::RgbaImage;
use kurbo::{Point, Size};
use log::debug;
use slidekit_core::{FlagStyle, Presentation};
use std::rc::Rc;

/// A presentation paired with a drawing surface.
///
/// The live stage owns the viewer's surface; cloned stages own a secondary
/// surface for one print, cache or export pass.
pub struct Stage<S: Surface> {
    presentation: Presentation,
    surface: S,
    factory: Rc<dyn SurfaceFactory>,
}

/// A stage drawing on a boxed secondary surface.
pub type DynStage = Stage<Box<dyn Surface>>;

impl<S: Surface> Stage<S> {
    /// Bind `presentation` to `surface`, sizing slides to the surface.
    pub fn new(presentation: Presentation, surface: S) -> Self {
        Self::with_factory(presentation, surface, Rc::new(DefaultSurfaceFactory))
    }

    /// Like [`Stage::new`], with a custom source of secondary surfaces.
    pub fn with_factory(
        mut presentation: Presentation,
        surface: S,
        factory: Rc<dyn SurfaceFactory>,
    ) -> Self {
        let size = surface.size();
        presentation.set_size(size.width, size.height);
        Self {
            presentation,
            surface,
            factory,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub(crate) fn factory(&self) -> &dyn SurfaceFactory {
        self.factory.as_ref()
    }

    pub fn into_parts(self) -> (Presentation, S) {
        (self.presentation, self.surface)
    }

    pub fn slide_count(&self) -> usize {
        self.presentation.slide_count()
    }

    pub fn current_index(&self) -> usize {
        self.presentation.current_index()
    }

    /// Move the cursor to `index` if it names a slide.
    pub fn move_to_if_can(&mut self, index: usize) -> bool {
        self.presentation.move_to_if_can(index)
    }

    pub fn slide_size(&self) -> Size {
        self.presentation.size()
    }

    /// Draw the slide under the cursor as one framed slide on the surface.
    pub fn draw_current(&mut self) -> RenderResult<()> {
        self.surface.begin_slide()?;
        if let Some(slide) = self.presentation.current_slide() {
            draw_slide(&mut self.surface, &self.presentation, slide)?;
        }
        self.surface.end_slide()
    }

    /// Draw slide `index` and return its pixels. Leaves the cursor on `index`.
    pub fn export_raster(&mut self, index: usize) -> RenderResult<RgbaImage> {
        if !self.presentation.move_to_if_can(index) {
            return Err(RendererError::RenderFailed(format!(
                "no slide at index {index} (count {})",
                self.slide_count()
            )));
        }
        self.draw_current()?;
        self.surface.snapshot()
    }

    /// Build a content replica of this stage drawing on `surface`.
    ///
    /// `setup` configures the fresh presentation first; the live theme, source
    /// and index mode are then copied over.
    pub fn clone_with<T: Surface>(
        &self,
        surface: T,
        setup: impl FnOnce(&mut Presentation),
    ) -> RenderResult<Stage<T>> {
        let live = &self.presentation;
        let mut presentation = Presentation::new();
        setup(&mut presentation);
        presentation.apply_theme(live.theme_name())?;
        if let Some(source) = live.source() {
            presentation.reingest_source(source)?;
        }
        if live.is_index_mode() {
            presentation.toggle_index_mode();
        }
        debug!(
            "Cloned {} slides from {} stage onto {} surface",
            presentation.slide_count(),
            self.surface.kind(),
            surface.kind()
        );
        Ok(Stage {
            presentation,
            surface,
            factory: Rc::clone(&self.factory),
        })
    }

    /// Draw a flag whose pole top sits at `origin`.
    pub fn draw_flag(
        &mut self,
        origin: Point,
        pole_height: f64,
        style: &FlagStyle,
    ) -> RenderResult<()> {
        flag::draw_flag(&mut self.surface, origin, pole_height, style)
    }

    /// Space a flag would take, without drawing it.
    pub fn flag_size(&self, pole_height: f64, style: &FlagStyle) -> RenderResult<Size> {
        flag::flag_size(&self.surface, pole_height, style)
    }
}
