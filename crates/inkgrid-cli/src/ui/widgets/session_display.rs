use inkgrid_engine::{GameSession, GameStatus};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{GridDisplay, HoverPreview, ScoreDisplay, TrayDisplay, color, style};

/// The whole play area: score panel, grid, tray and a message line.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    preview: Option<HoverPreview<'a>>,
    selected: Option<usize>,
    message: Option<&'a str>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            preview: None,
            selected: None,
            message: None,
        }
    }

    pub fn preview(self, preview: Option<HoverPreview<'a>>) -> Self {
        Self { preview, ..self }
    }

    pub fn selected(self, selected: Option<usize>) -> Self {
        Self { selected, ..self }
    }

    pub fn message(self, message: Option<&'a str>) -> Self {
        Self { message, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let status = self.session.status();
        let border_style = match status {
            GameStatus::Start | GameStatus::Playing => color::WHITE,
            GameStatus::Paused => color::GOLD,
            GameStatus::GameOver => color::RED,
        };
        let bordered = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let grid = GridDisplay::new(self.session.grid())
            .preview(self.preview)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let score = ScoreDisplay::new(self.session).block(bordered("SCORE"));
        let tray = TrayDisplay::new(self.session.tray(), self.session.grid())
            .selected(self.selected)
            .border_style(Style::new().fg(border_style));

        let center_width = u16::max(grid.width(), tray.width());
        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(score.width()),
            Constraint::Length(center_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [grid_area, message_area, tray_area] = Layout::vertical([
            Constraint::Length(grid.height()),
            Constraint::Length(1),
            Constraint::Length(tray.height()),
        ])
        .areas(center_column);
        let grid_area = grid_area.centered_horizontally(Constraint::Length(grid.width()));
        let [score_area] =
            Layout::vertical([Constraint::Length(score.height())]).areas(left_column);

        let grid_width = grid.width();
        score.render(score_area, buf);
        grid.render(grid_area, buf);
        tray.render(tray_area, buf);
        if let Some(text) = self.message {
            Line::styled(text, style::HIGHLIGHT)
                .centered()
                .render(message_area, buf);
        }

        let popup = match status {
            GameStatus::Start | GameStatus::Playing => None,
            GameStatus::Paused => Some(("PAUSED", style::PAUSED)),
            GameStatus::GameOver => Some(("NO MOVES LEFT", style::GAME_OVER)),
        };
        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = grid_area.centered(Constraint::Length(grid_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
