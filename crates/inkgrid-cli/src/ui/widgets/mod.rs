use inkgrid_engine::Rgb;
use ratatui::{layout::Rect, style::Color, widgets::Block as BlockWidget};

pub use self::{
    cell_display::*, grid_display::*, score_display::*, session_display::*, tray_display::*,
};

mod cell_display;
mod grid_display;
mod score_display;
mod session_display;
mod tray_display;

mod color {
    use ratatui::style::Color;

    pub const GOLD: Color = Color::Rgb(255, 200, 40);
    pub const RED: Color = Color::Rgb(220, 40, 40);
    pub const GREEN: Color = Color::Rgb(60, 200, 90);
    pub const PAPER: Color = Color::Rgb(28, 26, 24);
    pub const GRID_LINE: Color = Color::Rgb(70, 66, 60);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(240, 236, 228);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::PAPER);
    pub const EMPTY_DOT: Style = fg_bg(color::GRID_LINE, color::PAPER);
    pub const PREVIEW_OK: Style = fg_bg(color::GREEN, color::PAPER);
    pub const PREVIEW_BAD: Style = fg_bg(color::RED, color::PAPER);
    pub const LABEL: Style = fg_bg(color::GRAY, color::PAPER);
    pub const HIGHLIGHT: Style = fg_bg(color::GOLD, color::PAPER);
    pub const PAUSED: Style = fg_bg(color::BLACK, color::GOLD);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);
}

const fn ink_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
