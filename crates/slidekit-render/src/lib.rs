//! SlideKit Render Library
//!
//! Drawing surfaces, the slide painter, flag annotations and the traversals
//! that print, cache and export a presentation.

mod error;
pub mod flag;
mod orchestrator;
pub mod painter;
mod stage;
pub mod surface;
pub mod surfaces;
pub mod text;

pub use error::{RenderResult, RendererError};
pub use flag::{FlagGeometry, draw_flag, flag_size};
pub use orchestrator::{SlidePixbufs, TraversalHooks};
pub use stage::{DynStage, Stage};
pub use surface::{
    Capabilities, DefaultSurfaceFactory, DrawCommand, PageSetup, Surface, SurfaceFactory,
};
pub use surfaces::{PixmapSurface, PrintSurface, ScreenSurface};
pub use text::{Alignment, FontWeight, TextLayout};
