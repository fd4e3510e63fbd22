//! Paints a slide onto a surface.

use crate::error::RenderResult;
use crate::flag::draw_flag;
use crate::surface::Surface;
use crate::text::{Alignment, TextLayout};
use kurbo::{Point, Rect};
use slidekit_core::{Element, Presentation, Slide, TextAttributes, Theme, span_markup};

/// Vertical gap below the title.
const TITLE_GAP: f64 = 16.0;
/// Vertical gap between flowing elements.
const ELEMENT_GAP: f64 = 12.0;
/// Indent of list items.
const LIST_INDENT: f64 = 24.0;

/// Draw `slide` using the presentation's theme and margins.
///
/// The caller frames the call with `begin_slide`/`end_slide`.
pub fn draw_slide<S: Surface + ?Sized>(
    surface: &mut S,
    presentation: &Presentation,
    slide: &Slide,
) -> RenderResult<()> {
    let theme = presentation.theme();
    let size = presentation.size();
    surface.draw_filled_rect(Rect::from_origin_size(Point::ZERO, size), theme.background.into())?;

    let margins = &presentation.margins;
    let left = margins.left();
    let content_width = (size.width - margins.horizontal()).max(0.0);
    let mut y = margins.top();

    if !slide.title.is_empty() {
        let mut attrs = TextAttributes::new();
        attrs.insert("size".to_string(), theme.title_size.to_string());
        attrs.insert("weight".to_string(), "bold".to_string());
        attrs.insert("foreground".to_string(), theme.foreground.to_hex());
        let mut layout = surface.measure_text(&span_markup(&slide.title, &attrs))?;
        layout.set_width(content_width);
        layout.set_alignment(Alignment::Center);
        surface.draw_text_layout(&layout, Point::new(left, y))?;
        y += layout.height() + TITLE_GAP;
    }

    let origin = Point::new(left, y);
    for element in &slide.elements {
        match element {
            Element::Text { text, attributes } => {
                let layout = body_layout(surface, &theme, text, attributes)?;
                surface.draw_text_layout(&layout, Point::new(left, y))?;
                y += layout.height() + ELEMENT_GAP;
            }
            Element::EnumList { attributes, .. } => {
                for (number, item) in element.ordered_items() {
                    let line = format!("{number}. {item}");
                    let layout = body_layout(surface, &theme, &line, attributes)?;
                    surface.draw_text_layout(&layout, Point::new(left + LIST_INDENT, y))?;
                    y += layout.height();
                }
                y += ELEMENT_GAP;
            }
            Element::Rectangle {
                x,
                y: top,
                width,
                height,
                color,
            } => {
                let rect =
                    Rect::from_origin_size((origin.x + x, origin.y + top), (*width, *height));
                surface.draw_filled_rect(rect, (*color).into())?;
            }
            Element::Flag {
                x,
                y: top,
                pole_height,
                style,
            } => {
                draw_flag(surface, Point::new(origin.x + x, origin.y + top), *pole_height, style)?;
            }
        }
    }
    Ok(())
}

/// Measure body text, filling in the theme's size and color when unset.
fn body_layout<S: Surface + ?Sized>(
    surface: &S,
    theme: &Theme,
    text: &str,
    attributes: &TextAttributes,
) -> RenderResult<TextLayout> {
    let mut attrs = attributes.clone();
    attrs
        .entry("size".to_string())
        .or_insert_with(|| theme.body_size.to_string());
    attrs
        .entry("foreground".to_string())
        .or_insert_with(|| theme.foreground.to_hex());
    surface.measure_text(&span_markup(text, &attrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawCommand;
    use crate::surfaces::ScreenSurface;
    use kurbo::Size;
    use slidekit_core::{FlagStyle, Margins, SerializableColor};

    fn presentation() -> Presentation {
        let mut presentation = Presentation::new();
        presentation.set_size(400.0, 300.0);
        presentation.margins = Margins::uniform(20.0);
        presentation
    }

    fn paint(presentation: &Presentation, slide: &Slide) -> Vec<DrawCommand> {
        let mut surface = ScreenSurface::new(presentation.size());
        draw_slide(&mut surface, presentation, slide).unwrap();
        surface.commands().to_vec()
    }

    #[test]
    fn test_background_covers_slide() {
        let commands = paint(&presentation(), &Slide::new(""));
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            DrawCommand::FillRect { rect, color } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 400.0, 300.0));
                assert_eq!(SerializableColor::from(*color), SerializableColor::white());
            }
            other => panic!("expected background, got {other:?}"),
        }
    }

    #[test]
    fn test_title_is_centered_and_bold() {
        let commands = paint(&presentation(), &Slide::new("Hello"));
        match &commands[1] {
            DrawCommand::Text { layout, origin } => {
                assert_eq!(layout.lines(), ["Hello".to_string()]);
                assert_eq!(layout.alignment(), Alignment::Center);
                assert_eq!(layout.width(), Some(360.0));
                assert_eq!(layout.font_size(), 40.0);
                assert_eq!(*origin, Point::new(20.0, 20.0));
            }
            other => panic!("expected title, got {other:?}"),
        }
    }

    #[test]
    fn test_elements_flow_below_title() {
        let slide = Slide::new("T")
            .with_element(Element::text("para"))
            .with_element(Element::enum_list(["one", "two"]));
        let commands = paint(&presentation(), &slide);
        let texts: Vec<(String, Point)> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { layout, origin } => Some((layout.lines()[0].clone(), *origin)),
                _ => None,
            })
            .collect();

        // title: 40 * 1.2 = 48 tall, body lines 24 * 1.2 = 28.8
        let body_top = 20.0 + 48.0 + TITLE_GAP;
        assert_eq!(texts[1], ("para".to_string(), Point::new(20.0, body_top)));
        let list_top = body_top + 28.8 + ELEMENT_GAP;
        assert_eq!(texts[2].0, "1. one");
        assert!((texts[2].1.y - list_top).abs() < 1e-9);
        assert_eq!(texts[2].1.x, 20.0 + LIST_INDENT);
        assert_eq!(texts[3].0, "2. two");
        assert!((texts[3].1.y - (list_top + 28.8)).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_attributes_win() {
        let mut attributes = TextAttributes::new();
        attributes.insert("size".to_string(), "10".to_string());
        let slide = Slide::new("").with_element(Element::Text {
            text: "small".to_string(),
            attributes,
        });
        let commands = paint(&presentation(), &slide);
        match &commands[1] {
            DrawCommand::Text { layout, .. } => assert_eq!(layout.font_size(), 10.0),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_theme_colors_are_used() {
        let mut presentation = presentation();
        presentation.apply_theme("night").unwrap();
        let commands = paint(&presentation, &Slide::new("").with_element(Element::text("x")));
        let night = Theme::by_name("night").unwrap();
        match (&commands[0], &commands[1]) {
            (DrawCommand::FillRect { color, .. }, DrawCommand::Text { layout, .. }) => {
                assert_eq!(SerializableColor::from(*color), night.background);
                assert_eq!(layout.color(), night.foreground);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_absolute_elements_are_offset_from_content_origin() {
        let slide = Slide::new("")
            .with_element(Element::Rectangle {
                x: 5.0,
                y: 6.0,
                width: 10.0,
                height: 10.0,
                color: SerializableColor::red(),
            })
            .with_element(Element::Flag {
                x: 50.0,
                y: 0.0,
                pole_height: 40.0,
                style: FlagStyle::default(),
            });
        let commands = paint(&presentation(), &slide);
        assert_eq!(commands.len(), 1 + 1 + 3);
        match (&commands[1], &commands[2]) {
            (DrawCommand::FillRect { rect, .. }, DrawCommand::FillRect { rect: pole, .. }) => {
                assert_eq!(*rect, Rect::new(25.0, 26.0, 35.0, 36.0));
                assert_eq!(pole.origin(), Point::new(70.0, 20.0));
                assert_eq!(pole.size(), Size::new(2.0, 40.0));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }
}
