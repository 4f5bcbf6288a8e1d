use std::iter;

use inkgrid_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Score, high score, combo and per-game totals.
pub struct ScoreDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameSession) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameSession) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|session| session.score().to_string()),
    Row::FullLabel("BEST:"),
    Row::FullValue(&|session| session.high_score().max(session.score()).to_string()),
    Row::Empty,
    Row::LabelValue("COMBO:", &|session| format!("x{}", session.combo().combo())),
    Row::LabelValue("STREAK:", &|session| session.combo().streak().to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|session| {
        session.stats().lines_cleared().to_string()
    }),
    Row::LabelValue("BLOCKS:", &|session| {
        session.stats().blocks_placed().to_string()
    }),
    Row::LabelValue("DOUBLES:", &|session| {
        session.stats().line_clear_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES+:", &|session| {
        session.stats().line_clear_counter()[3..]
            .iter()
            .sum::<usize>()
            .to_string()
    }),
    Row::Empty,
    Row::LabelValue("THEME:", &|session| session.theme().name().to_owned()),
];

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style::LABEL)
                        .left_aligned()
                        .render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.session), style::DEFAULT)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style::LABEL)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), style::DEFAULT)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
