use std::iter;

use inkgrid_engine::{Grid, MAX_SPAN, Shape, TRAY_SLOTS, Tray, placement};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, color, style};

/// A single tray slot: the shape centred in a `MAX_SPAN`-square box.
#[derive(Debug)]
struct SlotDisplay<'a> {
    shape: Option<&'a Shape>,
    fits: bool,
}

impl SlotDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    const SPAN: u16 = MAX_SPAN as u16;

    /// Outer size of a bordered slot.
    fn outer_size() -> (u16, u16) {
        let block = Block::bordered();
        (
            Self::SPAN * CellDisplay::width() + super::block_horizontal_margin(Some(&block)),
            Self::SPAN * CellDisplay::height() + super::block_vertical_margin(Some(&block)),
        )
    }
}

impl Widget for SlotDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(shape) = self.shape else {
            return;
        };
        let rows = u16::try_from(shape.rows()).unwrap_or(0);
        let cols = u16::try_from(shape.cols()).unwrap_or(0);
        let area = area.centered(
            Constraint::Length(cols * CellDisplay::width()),
            Constraint::Length(rows * CellDisplay::height()),
        );
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(1)));
        let horizontal =
            Layout::horizontal((0..cols).map(|_| Constraint::Length(CellDisplay::width())));
        for (r, row_area) in iter::zip(0..shape.rows(), vertical.split(area).iter()) {
            for (c, cell_area) in iter::zip(0..shape.cols(), horizontal.split(*row_area).iter()) {
                if !shape.layout().is_filled(r, c) {
                    continue;
                }
                let cell = CellDisplay::ink(shape.ink());
                let cell = if self.fits { cell } else { cell.dimmed() };
                cell.render(*cell_area, buf);
            }
        }
    }
}

/// The three tray slots side by side.
///
/// Shapes that fit nowhere on the grid are dimmed; the selected slot gets a
/// highlighted border.
#[derive(Debug)]
pub struct TrayDisplay<'a> {
    tray: &'a Tray,
    grid: &'a Grid,
    selected: Option<usize>,
    border_style: Style,
}

impl<'a> TrayDisplay<'a> {
    pub fn new(tray: &'a Tray, grid: &'a Grid) -> Self {
        Self {
            tray,
            grid,
            selected: None,
            border_style: Style::new().fg(color::WHITE),
        }
    }

    pub fn selected(self, selected: Option<usize>) -> Self {
        Self { selected, ..self }
    }

    pub fn border_style(self, border_style: Style) -> Self {
        Self {
            border_style,
            ..self
        }
    }

    fn slot_block(&self, slot: usize) -> Block<'static> {
        let border_style = if self.selected == Some(slot) {
            style::HIGHLIGHT
        } else {
            self.border_style
        };
        Block::bordered()
            .title(Line::from((slot + 1).to_string()).centered())
            .border_style(border_style)
            .style(style::DEFAULT)
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        let (slot_width, _) = SlotDisplay::outer_size();
        // slots plus one column of spacing between neighbours
        slot_width * TRAY_SLOTS as u16 + (TRAY_SLOTS as u16 - 1)
    }

    pub fn height(&self) -> u16 {
        SlotDisplay::outer_size().1
    }
}

impl Widget for TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (slot_width, _) = SlotDisplay::outer_size();
        let slot_areas =
            Layout::horizontal((0..TRAY_SLOTS).map(|_| Constraint::Length(slot_width)))
                .flex(Flex::Center)
                .spacing(1)
                .split(area);

        for (slot, slot_area) in iter::zip(0..TRAY_SLOTS, slot_areas.iter()) {
            let block = Some(self.slot_block(slot));
            block.as_ref().render(*slot_area, buf);
            let inner = block.inner_if_some(*slot_area);
            let shape = self.tray.get(slot);
            let fits =
                shape.is_some_and(|shape| placement::can_place_anywhere(self.grid, shape.layout()));
            SlotDisplay { shape, fits }.render(inner, buf);
        }
    }
}
