//! Prints a deck and exports its slides as PNG files.

use crate::config::AppConfig;
use crate::error::AppResult;
use image::RgbaImage;
use kurbo::Size;
use log::info;
use slidekit_core::Presentation;
use slidekit_render::{ScreenSurface, Stage, TraversalHooks};
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Slides sent to the printer.
    pub printed: usize,
    /// PNG files written, in slide order.
    pub images: Vec<PathBuf>,
}

/// Encode an RGBA image to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> AppResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(png_data)
}

/// Load the deck named by `config` and produce its outputs.
pub fn run(config: &AppConfig) -> AppResult<RunSummary> {
    let mut presentation = Presentation::load(&config.deck)?;
    if let Some(theme) = &config.theme {
        presentation.apply_theme(theme)?;
    }
    presentation.margins = config.margins;
    presentation.page_margins = config.page_margins;
    presentation.paper_width = config.paper_width;
    presentation.paper_height = config.paper_height;
    presentation.slides_per_page = config.slides_per_page;
    presentation.filename = config.print_output.clone();

    let surface = ScreenSurface::new(Size::new(config.width, config.height));
    let mut stage = Stage::new(presentation, surface);
    stage.draw_current()?;
    info!("{}: {} slides from {:?}", config.title, stage.slide_count(), config.deck);

    let mut summary = RunSummary::default();
    if config.print_output.is_some() {
        let mut printed = 0;
        stage.print(TraversalHooks::new().each(|_| printed += 1))?;
        summary.printed = printed;
    }

    if let Some(dir) = &config.image_dir {
        std::fs::create_dir_all(dir)?;
        for item in stage.each_slide_pixbuf()? {
            let (image, index) = item?;
            let path = dir.join(format!("slide-{}.png", index + 1));
            let png_data = encode_png(&image)?;
            std::fs::write(&path, &png_data)?;
            info!("Wrote {:?} ({} bytes)", path, png_data.len());
            summary.images.push(path);
        }
    }
    Ok(summary)
}
