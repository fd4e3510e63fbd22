//! SlideKit Core Library
//!
//! Platform-agnostic presentation model: slide documents, slides and their
//! elements, themes, text markup and the presentation state that surfaces
//! draw from.

pub mod color;
pub mod document;
pub mod error;
pub mod markup;
pub mod page;
pub mod presentation;
pub mod slides;
pub mod theme;

pub use color::SerializableColor;
pub use document::SlideDocument;
pub use error::{CoreError, CoreResult};
pub use markup::{Markup, TextAttributes, span_markup, to_attrs};
pub use page::Margins;
pub use presentation::{DEFAULT_HEIGHT, DEFAULT_WIDTH, INDEX_ENTRIES_PER_SLIDE, Presentation};
pub use slides::{Element, FlagKind, FlagStyle, Slide};
pub use theme::{DEFAULT_THEME, Theme};
