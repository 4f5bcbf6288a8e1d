use inkgrid_engine::Ink;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::{color, ink_color, style};

/// One grid or tray cell, two columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: char,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: char) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn empty() -> Self {
        Self::new(style::EMPTY_DOT, '·')
    }

    pub const fn ink(ink: Ink) -> Self {
        Self::new(
            Style::new().fg(color::BLACK).bg(ink_color(ink.color)),
            ink.symbol,
        )
    }

    /// The hovering shape over a cell it could be dropped on.
    pub const fn preview(ink: Ink) -> Self {
        Self::new(style::PREVIEW_OK.fg(ink_color(ink.color)), ink.symbol)
    }

    /// The hovering shape over a cell it cannot be dropped on.
    pub const fn blocked() -> Self {
        Self::new(style::PREVIEW_BAD, '×')
    }

    /// Marks a cell that belongs to a line the hovering shape would clear.
    #[must_use]
    pub const fn highlighted(self) -> Self {
        Self::new(self.style.add_modifier(Modifier::REVERSED), self.symbol)
    }

    #[must_use]
    pub const fn dimmed(self) -> Self {
        Self::new(self.style.add_modifier(Modifier::DIM), self.symbol)
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area with the style, not just the symbol
        Paragraph::new(self.symbol.to_string())
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
