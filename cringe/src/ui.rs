//! Shared presentation: the palette lifted from the original dark theme and
//! a few layout helpers used by both pages.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const BACKGROUND: Color = Color::Rgb(0x33, 0x33, 0x33);
pub const FOREGROUND: Color = Color::White;
pub const ACCENT: Color = Color::Rgb(0xff, 0xd7, 0x00);
pub const DANGER: Color = Color::Rgb(0xd9, 0x53, 0x4f);
pub const DANGER_PRESSED: Color = Color::Rgb(0xc5, 0x3b, 0x3b);
pub const BUTTON: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const BUTTON_PRESSED: Color = Color::Rgb(0xff, 0xec, 0x84);
pub const DISABLED: Color = Color::Rgb(0x88, 0x88, 0x88);
pub const TABLE_HEADER: Color = Color::Rgb(0x55, 0x55, 0x55);
pub const ROW_HIGHLIGHT: Color = Color::Rgb(0x44, 0x44, 0x44);

pub fn base() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

pub fn title() -> Style {
    Style::default().fg(FOREGROUND).add_modifier(Modifier::BOLD)
}

/// The big tap button: white face, pale yellow while pressed.
pub fn tap_button(pressed: bool) -> Style {
    let bg = if pressed { BUTTON_PRESSED } else { BUTTON };
    Style::default()
        .bg(bg)
        .fg(BACKGROUND)
        .add_modifier(Modifier::BOLD)
}

/// Red action button (reset, clear), darker while pressed.
pub fn danger_button(pressed: bool) -> Style {
    let bg = if pressed { DANGER_PRESSED } else { DANGER };
    Style::default()
        .bg(bg)
        .fg(FOREGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn disabled_button() -> Style {
    Style::default().bg(DISABLED).fg(FOREGROUND)
}

pub fn table_header() -> Style {
    Style::default()
        .bg(TABLE_HEADER)
        .fg(FOREGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_row() -> Style {
    Style::default().bg(ROW_HIGHLIGHT)
}

/// Two-dot page indicator, gold dot marking the active page.
pub fn dots(active: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(3);
    for page in 0..2 {
        if page > 0 {
            spans.push(Span::raw(" "));
        }
        let color = if page == active { ACCENT } else { FOREGROUND };
        spans.push(Span::styled("●", Style::default().fg(color)));
    }
    Line::from(spans)
}

/// A `width` x `height` rect centered inside `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
