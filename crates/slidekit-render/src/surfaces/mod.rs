//! Concrete surfaces: the live screen, paginated print output and offscreen
//! pixmaps.

mod pixmap;
mod print;
mod screen;

pub use pixmap::PixmapSurface;
pub use print::PrintSurface;
pub use screen::ScreenSurface;
