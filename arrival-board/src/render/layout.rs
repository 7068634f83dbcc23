//! Page composition.
//!
//! A record page holds two records, one above and one below a rule. An alert
//! page holds a header, up to four wrapped lines of the post and a page
//! counter.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_7X13, FONT_8X13, FONT_9X18_BOLD};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use super::canvas::Canvas;
use super::icons::{Icon, draw_icon};
use crate::alerts::AlertPage;
use crate::board::DisplayRecord;

/// The 2.13" e-paper panel in landscape.
pub const PANEL_SIZE: Size = Size::new(250, 122);

pub const ALERT_HEADER: &str = "Latest Tweet from @CTA";

const TEXT_X: i32 = 1;
const SEPARATOR_Y: i32 = 60;
const SEPARATOR_HEIGHT: u32 = 3;
const ALERT_BODY_Y: [i32; 4] = [20, 40, 60, 80];
const ALERT_FOOTER_Y: i32 = 100;

struct Slot {
    lines_y: [i32; 3],
    icon: Point,
}

const TOP: Slot = Slot {
    lines_y: [1, 20, 38],
    icon: Point::new(225, 35),
};

const BOTTOM: Slot = Slot {
    lines_y: [65, 84, 102],
    icon: Point::new(225, 97),
};

/// One screenful.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Records {
        top: DisplayRecord,
        bottom: Option<DisplayRecord>,
    },
    Alert(AlertPage),
}

/// A page drawn to a bitmap, plus its text for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub canvas: Canvas,
    pub lines: Vec<String>,
}

/// Pair records two to a page; an odd last record gets the top slot alone.
pub fn record_pages(records: &[DisplayRecord]) -> Vec<Page> {
    records
        .chunks(2)
        .map(|pair| Page::Records {
            top: pair[0].clone(),
            bottom: pair.get(1).cloned(),
        })
        .collect()
}

pub fn alert_page_list(pages: Vec<AlertPage>) -> Vec<Page> {
    pages.into_iter().map(Page::Alert).collect()
}

/// Draw `page` onto a fresh canvas of `size`.
pub fn render(page: &Page, size: Size) -> RenderedPage {
    let mut canvas = Canvas::new(size);
    let mut lines = Vec::new();

    match page {
        Page::Records { top, bottom } => {
            draw_record(&mut canvas, &mut lines, top, &TOP);
            Rectangle::new(
                Point::new(0, SEPARATOR_Y),
                Size::new(size.width, SEPARATOR_HEIGHT),
            )
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut canvas)
            .ok();
            if let Some(bottom) = bottom {
                draw_record(&mut canvas, &mut lines, bottom, &BOTTOM);
            }
        }
        Page::Alert(alert) => {
            draw_text(&mut canvas, ALERT_HEADER, 0, 0, &FONT_9X18_BOLD);
            lines.push(ALERT_HEADER.to_string());

            for (line, y) in alert.lines.iter().zip(ALERT_BODY_Y) {
                draw_text(&mut canvas, line, 0, y, &FONT_8X13);
                lines.push(line.clone());
            }

            let footer = alert.footer();
            draw_text(&mut canvas, &footer, 0, ALERT_FOOTER_Y, &FONT_8X13);
            lines.push(footer);

            draw_icon(&mut canvas, Icon::Alert, BOTTOM.icon);
        }
    }

    RenderedPage { canvas, lines }
}

fn draw_record(canvas: &mut Canvas, lines: &mut Vec<String>, record: &DisplayRecord, slot: &Slot) {
    let texts = [&record.line_1, &record.line_2, &record.line_3];
    // 7 px cells keep 32 characters clear of the icon column
    let fonts = [&FONT_9X18_BOLD, &FONT_7X13, &FONT_7X13];

    for ((text, font), y) in texts.into_iter().zip(fonts).zip(slot.lines_y) {
        draw_text(canvas, text, TEXT_X, y, font);
        lines.push(text.clone());
    }
    draw_icon(canvas, Icon::from(record.kind), slot.icon);
}

fn draw_text(canvas: &mut Canvas, text: &str, x: i32, y: i32, font: &MonoFont<'_>) {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
        .draw(canvas)
        .ok();
}
