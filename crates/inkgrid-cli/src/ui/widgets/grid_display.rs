use std::iter;

use inkgrid_engine::{ClearedLines, Grid, Shape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// A shape hovering over the grid at a signed anchor.
#[derive(Debug, Clone)]
pub struct HoverPreview<'a> {
    pub shape: &'a Shape,
    pub row: isize,
    pub col: isize,
    pub legal: bool,
    pub lines: ClearedLines,
}

impl HoverPreview<'_> {
    fn covers(&self, row: usize, col: usize) -> bool {
        let (Ok(row), Ok(col)) = (isize::try_from(row), isize::try_from(col)) else {
            return false;
        };
        let (dr, dc) = (row - self.row, col - self.col);
        match (usize::try_from(dr), usize::try_from(dc)) {
            (Ok(dr), Ok(dc)) => {
                let layout = self.shape.layout();
                dr < layout.rows() && dc < layout.cols() && layout.is_filled(dr, dc)
            }
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    preview: Option<HoverPreview<'a>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            preview: None,
            block: None,
        }
    }

    pub fn preview(self, preview: Option<HoverPreview<'a>>) -> Self {
        Self { preview, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn cells(&self) -> u16 {
        u16::try_from(self.grid.size()).unwrap_or(u16::MAX)
    }

    pub fn width(&self) -> u16 {
        self.cells() * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.cells() * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell(&self, row: usize, col: usize) -> CellDisplay {
        let ink = self.grid.get(row, col).ok().flatten();
        let mut cell = ink.map_or_else(CellDisplay::empty, CellDisplay::ink);
        if let Some(preview) = &self.preview {
            if preview.covers(row, col) {
                cell = if preview.legal {
                    CellDisplay::preview(preview.shape.ink())
                } else {
                    CellDisplay::blocked()
                };
            }
            if preview.lines.contains_cell(row, col) {
                cell = cell.highlighted();
            }
        }
        cell
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let size = self.grid.size();
        let col_constraints = (0..size).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..size).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        for (row, row_area) in iter::zip(0..size, vertical.split(area).iter()) {
            for (col, cell_area) in iter::zip(0..size, horizontal.split(*row_area).iter()) {
                self.cell(row, col).render(*cell_area, buf);
            }
        }
    }
}
