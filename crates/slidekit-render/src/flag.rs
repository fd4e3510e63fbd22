//! Pole-and-flag annotations.
//!
//! A flag is a vertical pole with a triangular pennant or a rectangular banner
//! at its top, optionally carrying centered text. Every unset style entry is
//! derived from the pole height and the measured text:
//!
//! - default flag width: `max(text_width * ratio, pole_height / 2)` with text
//!   (ratio 1.5 for triangles, 1.3 for rectangles)
//! - default flag height: `max(text_height, default flag width)` with text,
//!   `pole_height / 2` without
//! - the flag height never exceeds the pole height
//! - without text or an explicit width the flag is as wide as it is tall
//! - the frame takes the pole's width and color unless set
//!
//! [`flag_size`] reserves space with the triangle ratio for every kind.

use crate::error::RenderResult;
use crate::surface::Surface;
use crate::text::{Alignment, TextLayout};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use slidekit_core::{FlagKind, FlagStyle, SerializableColor, span_markup};

/// Pole width when the style leaves it unset.
pub const DEFAULT_POLE_WIDTH: f64 = 2.0;
/// Share of a triangle's width available to its text.
pub const TRIANGLE_TEXT_WIDTH: f64 = 0.8;
/// Text width ratio used by [`flag_size`], whatever the flag kind.
pub const FLAG_SIZE_RATIO: f64 = 1.5;

/// Fully resolved flag parameters.
#[derive(Debug, Clone)]
pub struct FlagGeometry {
    pub kind: FlagKind,
    pub layout: Option<TextLayout>,
    pub text_width: f64,
    pub text_height: f64,
    pub pole_width: f64,
    pub pole_color: Color,
    pub flag_height: f64,
    pub flag_width: f64,
    pub flag_color: Color,
    pub frame_width: f64,
    pub frame_color: Color,
}

impl FlagGeometry {
    /// Resolve `style` for a pole of `pole_height`, measuring text on `surface`.
    pub fn derive<S: Surface + ?Sized>(
        surface: &S,
        pole_height: f64,
        style: &FlagStyle,
    ) -> RenderResult<Self> {
        Self::derive_with_ratio(surface, pole_height, style, style.kind.width_ratio())
    }

    /// Like [`FlagGeometry::derive`], widening text by `ratio` instead of the
    /// kind's own ratio.
    pub fn derive_with_ratio<S: Surface + ?Sized>(
        surface: &S,
        pole_height: f64,
        style: &FlagStyle,
        ratio: f64,
    ) -> RenderResult<Self> {
        let (layout, text_width, text_height, width_default, height_default) = match &style.text {
            Some(text) => {
                let layout = surface.measure_text(&span_markup(text, &style.text_attributes))?;
                let text_size = layout.pixel_size();
                let width_default = (text_size.width * ratio).max(pole_height / 2.0);
                let height_default = text_size.height.max(width_default);
                (
                    Some(layout),
                    text_size.width,
                    text_size.height,
                    Some(width_default),
                    Some(height_default),
                )
            }
            None => (None, 0.0, 0.0, None, None),
        };

        let pole_width = style.pole_width.unwrap_or(DEFAULT_POLE_WIDTH);
        let pole_color = style.pole_color.unwrap_or(SerializableColor::black());
        let flag_height = style
            .flag_height
            .or(height_default)
            .unwrap_or(pole_height / 2.0)
            .max(0.0)
            .min(pole_height);
        let flag_width = style.flag_width.or(width_default).unwrap_or(flag_height);

        Ok(Self {
            kind: style.kind,
            layout,
            text_width,
            text_height,
            pole_width,
            pole_color: pole_color.into(),
            flag_height,
            flag_width,
            flag_color: style.flag_color.unwrap_or(SerializableColor::red()).into(),
            frame_width: style.flag_frame_width.unwrap_or(pole_width),
            frame_color: style.flag_frame_color.unwrap_or(pole_color).into(),
        })
    }

    /// Space taken by pole and flag together.
    pub fn total_size(&self, pole_height: f64) -> Size {
        Size::new(self.pole_width + self.flag_width, pole_height)
    }
}

/// Draw a flag whose pole top sits at `origin`.
pub fn draw_flag<S: Surface + ?Sized>(
    surface: &mut S,
    origin: Point,
    pole_height: f64,
    style: &FlagStyle,
) -> RenderResult<()> {
    let geometry = FlagGeometry::derive(surface, pole_height, style)?;
    match geometry.kind {
        FlagKind::Triangle => draw_triangle_flag(surface, origin, pole_height, &geometry),
        FlagKind::Rectangle => draw_rectangle_flag(surface, origin, pole_height, &geometry),
    }
}

/// Size a flag would occupy, without drawing it.
pub fn flag_size<S: Surface + ?Sized>(
    surface: &S,
    pole_height: f64,
    style: &FlagStyle,
) -> RenderResult<Size> {
    let geometry = FlagGeometry::derive_with_ratio(surface, pole_height, style, FLAG_SIZE_RATIO)?;
    Ok(geometry.total_size(pole_height))
}

fn draw_pole<S: Surface + ?Sized>(
    surface: &mut S,
    origin: Point,
    pole_height: f64,
    g: &FlagGeometry,
) -> RenderResult<()> {
    surface.draw_filled_rect(
        Rect::from_origin_size(origin, (g.pole_width, pole_height)),
        g.pole_color,
    )
}

fn draw_triangle_flag<S: Surface + ?Sized>(
    surface: &mut S,
    origin: Point,
    pole_height: f64,
    g: &FlagGeometry,
) -> RenderResult<()> {
    draw_pole(surface, origin, pole_height, g)?;

    let base_x = origin.x + g.pole_width;
    let y = origin.y;
    surface.draw_filled_polygon(
        &[
            Point::new(base_x, y),
            Point::new(base_x + g.flag_width, y + g.flag_height / 2.0),
            Point::new(base_x, y + g.flag_height),
        ],
        g.frame_color,
    )?;
    // Only the horizontal extent shrinks by twice the frame width.
    surface.draw_filled_polygon(
        &[
            Point::new(base_x, y + g.frame_width),
            Point::new(
                base_x + g.flag_width - 2.0 * g.frame_width,
                y + g.flag_height / 2.0,
            ),
            Point::new(base_x, y + g.flag_height - g.frame_width),
        ],
        g.flag_color,
    )?;

    if let Some(layout) = &g.layout {
        draw_flag_layout(surface, layout, origin, g, g.flag_width * TRIANGLE_TEXT_WIDTH)?;
    }
    Ok(())
}

fn draw_rectangle_flag<S: Surface + ?Sized>(
    surface: &mut S,
    origin: Point,
    pole_height: f64,
    g: &FlagGeometry,
) -> RenderResult<()> {
    draw_pole(surface, origin, pole_height, g)?;

    let base_x = origin.x + g.pole_width;
    surface.draw_filled_rect(
        Rect::from_origin_size((base_x, origin.y), (g.flag_width, g.flag_height)),
        g.frame_color,
    )?;
    surface.draw_filled_rect(
        Rect::from_origin_size(
            (base_x, origin.y + g.frame_width),
            (g.flag_width - g.frame_width, g.flag_height - 2.0 * g.frame_width),
        ),
        g.flag_color,
    )?;

    if let Some(layout) = &g.layout {
        let width = g.flag_width - 2.0 * g.frame_width;
        draw_flag_layout(surface, layout, origin, g, width)?;
    }
    Ok(())
}

/// Center the text horizontally in `width` past the pole, and vertically in
/// the flag band when it is shorter than the flag.
fn draw_flag_layout<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &TextLayout,
    origin: Point,
    g: &FlagGeometry,
    width: f64,
) -> RenderResult<()> {
    let mut layout = layout.clone();
    layout.set_width(width);
    layout.set_alignment(Alignment::Center);

    let base_x = origin.x + g.pole_width;
    let mut base_y = origin.y;
    if g.text_height < g.flag_height {
        base_y += (g.flag_height - g.text_height) / 2.0;
    }
    surface.draw_text_layout(&layout, Point::new(base_x, base_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawCommand;
    use crate::surfaces::ScreenSurface;

    fn screen() -> ScreenSurface {
        ScreenSurface::new(Size::new(400.0, 400.0))
    }

    fn rgba(color: Color) -> SerializableColor {
        SerializableColor::from(color)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn rect_of(command: &DrawCommand) -> Rect {
        match command {
            DrawCommand::FillRect { rect, .. } => *rect,
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    fn polygon_of(command: &DrawCommand) -> Vec<Point> {
        match command {
            DrawCommand::FillPolygon { points, .. } => points.clone(),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_without_text() {
        let g = FlagGeometry::derive(&screen(), 100.0, &FlagStyle::default()).unwrap();
        assert!(g.layout.is_none());
        assert_close(g.pole_width, 2.0);
        assert_close(g.flag_height, 50.0);
        assert_close(g.flag_width, 50.0);
        assert_close(g.frame_width, 2.0);
        assert_eq!(rgba(g.pole_color), SerializableColor::black());
        assert_eq!(rgba(g.flag_color), SerializableColor::red());
        assert_eq!(rgba(g.frame_color), SerializableColor::black());
    }

    #[test]
    fn test_flag_size_without_text() {
        for height in [0.0, 1.0, 37.0, 100.0] {
            let size = flag_size(&screen(), height, &FlagStyle::default()).unwrap();
            assert_close(size.width, DEFAULT_POLE_WIDTH + height / 2.0);
            assert_close(size.height, height);
        }
    }

    #[test]
    fn test_text_widths_follow_kind_ratio() {
        let surface = screen();
        for kind in [FlagKind::Triangle, FlagKind::Rectangle] {
            // "abcdefghij" at size 20: 10 * 20 * 0.55 = 110 wide, 24 tall
            let style = FlagStyle::new(kind)
                .with_text("abcdefghij")
                .with_text_attribute("size", "20");
            let g = FlagGeometry::derive(&surface, 100.0, &style).unwrap();
            assert_close(g.text_width, 110.0);
            assert_close(g.text_height, 24.0);
            assert_close(g.flag_width, (110.0 * kind.width_ratio()).max(50.0));
            // default height = max(24, width), clamped to the pole
            assert_close(g.flag_height, 100.0);
        }
    }

    #[test]
    fn test_short_text_uses_half_pole_width() {
        let style = FlagStyle::new(FlagKind::Rectangle).with_text("a");
        let g = FlagGeometry::derive(&screen(), 300.0, &style).unwrap();
        assert_close(g.flag_width, 150.0);
        assert_close(g.flag_height, 150.0);
    }

    #[test]
    fn test_flag_height_clamped_to_pole() {
        let style = FlagStyle::default().with_flag_size(10.0, 500.0);
        let g = FlagGeometry::derive(&screen(), 80.0, &style).unwrap();
        assert_close(g.flag_height, 80.0);
        assert_close(g.flag_width, 10.0);

        let style = FlagStyle::default().with_flag_size(10.0, -5.0);
        let g = FlagGeometry::derive(&screen(), 80.0, &style).unwrap();
        assert_close(g.flag_height, 0.0);
    }

    #[test]
    fn test_flag_height_invariant_over_inputs() {
        let surface = screen();
        let texts = [None, Some("x"), Some("a much longer label")];
        let heights = [None, Some(0.0), Some(5.0), Some(1000.0)];
        for pole_height in [0.0, 3.0, 40.0, 250.0] {
            for text in texts {
                for flag_height in heights {
                    let mut style = FlagStyle::default();
                    style.text = text.map(str::to_string);
                    style.flag_height = flag_height;
                    let g = FlagGeometry::derive(&surface, pole_height, &style).unwrap();
                    assert!(g.flag_height <= pole_height);
                    assert!(g.flag_height >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_negative_pole_height_is_accepted() {
        let g = FlagGeometry::derive(&screen(), -10.0, &FlagStyle::default()).unwrap();
        assert_close(g.flag_height, -10.0);
        let mut surface = screen();
        draw_flag(&mut surface, Point::ZERO, -10.0, &FlagStyle::default()).unwrap();
        assert_eq!(surface.commands().len(), 3);
    }

    #[test]
    fn test_frame_follows_pole() {
        let style = FlagStyle::default().with_pole(4.0, SerializableColor::new(0, 0, 255, 255));
        let g = FlagGeometry::derive(&screen(), 100.0, &style).unwrap();
        assert_close(g.frame_width, 4.0);
        assert_eq!(rgba(g.frame_color), SerializableColor::new(0, 0, 255, 255));

        let style = style.with_frame(1.0, SerializableColor::white());
        let g = FlagGeometry::derive(&screen(), 100.0, &style).unwrap();
        assert_close(g.frame_width, 1.0);
        assert_eq!(rgba(g.frame_color), SerializableColor::white());
    }

    #[test]
    fn test_flag_size_is_pure() {
        let surface = screen();
        let style = FlagStyle::new(FlagKind::Triangle).with_text("Milestone");
        let first = flag_size(&surface, 120.0, &style).unwrap();
        let second = flag_size(&surface, 120.0, &style).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_triangle_scenario() {
        let mut surface = screen();
        let origin = Point::new(10.0, 20.0);
        draw_flag(&mut surface, origin, 100.0, &FlagStyle::new(FlagKind::Triangle)).unwrap();
        let commands = surface.commands();
        assert_eq!(commands.len(), 3);

        assert_eq!(rect_of(&commands[0]), Rect::new(10.0, 20.0, 12.0, 120.0));
        assert_eq!(
            polygon_of(&commands[1]),
            vec![
                Point::new(12.0, 20.0),
                Point::new(62.0, 45.0),
                Point::new(12.0, 70.0)
            ]
        );
        assert_eq!(
            polygon_of(&commands[2]),
            vec![
                Point::new(12.0, 22.0),
                Point::new(58.0, 45.0),
                Point::new(12.0, 68.0)
            ]
        );
    }

    #[test]
    fn test_rectangle_scenario() {
        let mut surface = screen();
        draw_flag(&mut surface, Point::ZERO, 100.0, &FlagStyle::default()).unwrap();
        let commands = surface.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(rect_of(&commands[0]), Rect::new(0.0, 0.0, 2.0, 100.0));
        assert_eq!(rect_of(&commands[1]), Rect::new(2.0, 0.0, 52.0, 50.0));
        assert_eq!(rect_of(&commands[2]), Rect::new(2.0, 2.0, 50.0, 48.0));
    }

    #[test]
    fn test_unknown_kind_draws_rectangle() {
        let style = FlagStyle::new(FlagKind::from_name("pennant"));
        let mut surface = screen();
        draw_flag(&mut surface, Point::ZERO, 60.0, &style).unwrap();
        assert!(surface
            .commands()
            .iter()
            .all(|command| matches!(command, DrawCommand::FillRect { .. })));
    }

    #[test]
    fn test_text_is_centered_in_flag() {
        let mut surface = screen();
        let style = FlagStyle::new(FlagKind::Rectangle)
            .with_text("ab")
            .with_text_attribute("size", "10")
            .with_flag_size(80.0, 40.0);
        draw_flag(&mut surface, Point::new(0.0, 0.0), 100.0, &style).unwrap();
        let commands = surface.commands();
        assert_eq!(commands.len(), 4);
        match &commands[3] {
            DrawCommand::Text { layout, origin } => {
                assert_eq!(layout.width(), Some(80.0 - 2.0 * 2.0));
                assert_eq!(layout.alignment(), Alignment::Center);
                assert_close(origin.x, 2.0);
                assert_close(origin.y, (40.0 - 12.0) / 2.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_triangle_text_placement() {
        let mut surface = screen();
        // "ab" at size 10 is 12 tall, centered in a 30 tall flag
        let style = FlagStyle::new(FlagKind::Triangle)
            .with_text("ab")
            .with_text_attribute("size", "10")
            .with_flag_size(50.0, 30.0);
        draw_flag(&mut surface, Point::new(4.0, 6.0), 100.0, &style).unwrap();
        match surface.commands().last() {
            Some(DrawCommand::Text { layout, origin }) => {
                assert_eq!(layout.width(), Some(40.0));
                assert_eq!(layout.alignment(), Alignment::Center);
                assert_close(origin.x, 6.0);
                assert_close(origin.y, 6.0 + 9.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_tall_text_starts_at_flag_top() {
        let mut surface = screen();
        // 24 tall text in a 20 tall flag
        let style = FlagStyle::new(FlagKind::Rectangle)
            .with_text("ab")
            .with_text_attribute("size", "20")
            .with_flag_size(80.0, 20.0);
        draw_flag(&mut surface, Point::new(3.0, 7.0), 100.0, &style).unwrap();
        match surface.commands().last() {
            Some(DrawCommand::Text { origin, .. }) => {
                assert_close(origin.x, 5.0);
                assert_close(origin.y, 7.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_flag_size_uses_triangle_ratio_for_every_kind() {
        let surface = screen();
        // 16 chars at size 20: 176 wide, 176 * 1.5 = 264 > 100 / 2
        let rectangle = FlagStyle::new(FlagKind::Rectangle)
            .with_text("abcdefghijklmnop")
            .with_text_attribute("size", "20");
        let size = flag_size(&surface, 100.0, &rectangle).unwrap();
        assert_close(size.width, 2.0 + 264.0);
        assert_close(size.height, 100.0);

        let triangle = FlagStyle {
            kind: FlagKind::Triangle,
            ..rectangle.clone()
        };
        assert_eq!(flag_size(&surface, 100.0, &triangle).unwrap(), size);

        // drawing still uses the rectangle's own ratio
        let drawn = FlagGeometry::derive(&surface, 100.0, &rectangle).unwrap();
        assert_close(drawn.flag_width, 176.0 * 1.3);
    }

    #[test]
    fn test_unmeasurable_text_fails() {
        let style = FlagStyle::default()
            .with_text("x")
            .with_text_attribute("size", "huge");
        assert!(FlagGeometry::derive(&screen(), 100.0, &style).is_err());
    }
}
