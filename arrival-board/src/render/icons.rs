//! Drawn stand-ins for the mode icons.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_9X18_BOLD;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};

use super::canvas::Canvas;
use crate::board::ItemKind;

/// Icons are square.
pub const ICON_SIZE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Train,
    Bus,
    Bicycle,
    Alert,
}

impl Icon {
    fn glyph(self) -> &'static str {
        match self {
            Icon::Train => "T",
            Icon::Bus => "B",
            Icon::Bicycle => "D",
            Icon::Alert => "!",
        }
    }
}

impl From<ItemKind> for Icon {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Train => Icon::Train,
            ItemKind::Bus => Icon::Bus,
            ItemKind::Bicycle => Icon::Bicycle,
        }
    }
}

/// A rounded frame with the icon's letter centred inside.
pub fn draw_icon(canvas: &mut Canvas, icon: Icon, top_left: Point) {
    let frame = Rectangle::new(top_left, Size::new(ICON_SIZE, ICON_SIZE));
    RoundedRectangle::with_equal_corners(frame, Size::new(5, 5))
        .into_styled(
            PrimitiveStyleBuilder::new()
                .stroke_color(BinaryColor::On)
                .stroke_width(2)
                .stroke_alignment(StrokeAlignment::Inside)
                .build(),
        )
        .draw(canvas)
        .ok();

    let style = MonoTextStyle::new(&FONT_9X18_BOLD, BinaryColor::On);
    let glyph = FONT_9X18_BOLD.character_size;
    let offset = Point::new(
        ((ICON_SIZE - glyph.width) / 2) as i32,
        ((ICON_SIZE - glyph.height) / 2) as i32,
    );
    Text::with_baseline(icon.glyph(), top_left + offset, style, Baseline::Top)
        .draw(canvas)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_stays_inside_its_square() {
        let mut canvas = Canvas::new(Size::new(60, 60));
        draw_icon(&mut canvas, Icon::Train, Point::new(10, 10));

        assert!(canvas.ink() > 0);
        assert_eq!(canvas.ink_in_rows(0, 10), 0);
        assert_eq!(canvas.ink_in_rows(35, 60), 0);
    }

    #[test]
    fn icons_differ() {
        let mut bus = Canvas::new(Size::new(25, 25));
        let mut bike = Canvas::new(Size::new(25, 25));
        draw_icon(&mut bus, Icon::Bus, Point::zero());
        draw_icon(&mut bike, Icon::Bicycle, Point::zero());
        assert_ne!(bus, bike);
    }

    #[test]
    fn from_item_kind() {
        assert_eq!(Icon::from(ItemKind::Train), Icon::Train);
        assert_eq!(Icon::from(ItemKind::Bus), Icon::Bus);
        assert_eq!(Icon::from(ItemKind::Bicycle), Icon::Bicycle);
    }
}
