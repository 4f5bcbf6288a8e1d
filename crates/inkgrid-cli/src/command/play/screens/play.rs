use std::{
    fmt::Write as _,
    time::{Duration, Instant},
};

use crossterm::event::{Event, KeyCode};
use inkgrid_engine::{DROP_TOLERANCE, GameStatus, PlacementOutcome, TRAY_SLOTS, placement};
use inkgrid_store::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    command::play::{Session, screens::Transition},
    ui::widgets::{HoverPreview, SessionDisplay},
};

/// How long a message stays under the grid.
const MESSAGE_DURATION: Duration = Duration::from_secs(2);

/// The game itself.
///
/// A shape is picked from the tray with `1`-`3`, moved with the arrow keys
/// and dropped with Enter. The cursor may wander a little past the edges;
/// dropping it far outside the grid puts the shape back.
#[derive(Debug, Default)]
pub struct PlayScreen {
    selected: Option<usize>,
    cursor: (isize, isize),
    message: Option<(String, Instant)>,
}

impl PlayScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<S>(&self, session: &Session<S>, frame: &mut Frame<'_>) {
        let preview = self.selected.and_then(|slot| {
            let shape = session.tray().get(slot)?;
            let (row, col) = self.cursor;
            Some(HoverPreview {
                shape,
                row,
                col,
                legal: session.can_place(slot, row, col),
                lines: session.potential_lines(slot, row, col),
            })
        });
        let session_display = SessionDisplay::new(session)
            .preview(preview)
            .selected(self.selected)
            .message(self.message.as_ref().map(|(text, _)| text.as_str()));

        let help_text = match session.status() {
            GameStatus::Playing if self.selected.is_some() => {
                "Controls: ← → ↑ ↓ (Move) | Enter (Drop) | Esc (Put back) | P (Pause) | Q (Quit)"
            }
            GameStatus::Start | GameStatus::Playing => {
                "Controls: 1 2 3 / Tab (Pick) | R (Restart) | P (Pause) | H (Home) | Q (Quit)"
            }
            GameStatus::Paused => "Controls: P (Resume) | H (Home) | Q (Quit)",
            GameStatus::GameOver => "Controls: N (New game) | H (Home) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let layout = Layout::vertical([Constraint::Length(20), Constraint::Length(1)]);
        let [main_area, help_area] = layout.areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        event: &Event,
        now: Instant,
    ) -> Option<Transition> {
        let event = event.as_key_press_event()?;
        let status = session.status();
        let is_playing = status.is_playing();
        let can_toggle_pause = is_playing || status.is_paused();

        match event.code {
            KeyCode::Char(c @ '1'..='3') if is_playing => {
                if let Some(slot) = "123".find(c) {
                    self.pick(session, slot);
                }
            }
            KeyCode::Tab if is_playing => self.pick_next(session),
            KeyCode::Up if is_playing => self.move_cursor(session, -1, 0),
            KeyCode::Down if is_playing => self.move_cursor(session, 1, 0),
            KeyCode::Left if is_playing => self.move_cursor(session, 0, -1),
            KeyCode::Right if is_playing => self.move_cursor(session, 0, 1),
            KeyCode::Enter | KeyCode::Char(' ') if is_playing => self.drop_shape(session, now),
            KeyCode::Esc => self.selected = None,
            KeyCode::Char('r') if is_playing => {
                if session.restart() {
                    self.selected = None;
                    self.show("New game", now);
                }
            }
            KeyCode::Char('n') | KeyCode::Enter if status.is_game_over() => {
                session.start_game();
                self.selected = None;
                self.message = None;
            }
            KeyCode::Char('p') if can_toggle_pause => session.toggle_pause(),
            KeyCode::Char('h') => {
                session.return_home();
                return Some(Transition::Home);
            }
            KeyCode::Char('q') => return Some(Transition::Exit),
            _ => {}
        }
        self.show_unlocks(session, now);
        None
    }

    pub fn update<S: KeyValueStore>(&mut self, session: &mut Session<S>, now: Instant) {
        if session.tick(now) {
            log::debug!("streak decayed");
        }
        if self
            .message
            .as_ref()
            .is_some_and(|(_, shown_at)| now.duration_since(*shown_at) >= MESSAGE_DURATION)
        {
            self.message = None;
        }
    }

    fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some((text.into(), now));
    }

    fn show_unlocks<S: KeyValueStore>(&mut self, session: &mut Session<S>, now: Instant) {
        let names = session
            .hook_mut()
            .take_unlocked()
            .iter()
            .map(|achievement| achievement.name)
            .collect::<Vec<_>>();
        if !names.is_empty() {
            self.show(format!("Unlocked: {}", names.join(", ")), now);
        }
    }

    /// Picks up the shape in `slot`, centred over the grid.
    fn pick<S>(&mut self, session: &Session<S>, slot: usize) {
        let Some(shape) = session.tray().get(slot) else {
            return;
        };
        let size = session.grid().size();
        let centre = |span: usize| isize::try_from(size.saturating_sub(span) / 2).unwrap_or(0);
        self.selected = Some(slot);
        self.cursor = (centre(shape.rows()), centre(shape.cols()));
    }

    fn pick_next<S>(&mut self, session: &Session<S>) {
        let start = self.selected.map_or(0, |slot| slot + 1);
        let next = (start..start + TRAY_SLOTS)
            .map(|slot| slot % TRAY_SLOTS)
            .find(|&slot| session.tray().get(slot).is_some());
        if let Some(slot) = next {
            self.pick(session, slot);
        }
    }

    /// Moves the cursor, allowing it one step past the drop tolerance so a
    /// drop can be abandoned.
    fn move_cursor<S>(&mut self, session: &Session<S>, d_row: isize, d_col: isize) {
        if self.selected.is_none() {
            return;
        }
        let size = isize::try_from(session.grid().size()).unwrap_or(isize::MAX);
        let min = -DROP_TOLERANCE - 1;
        let max = size + DROP_TOLERANCE + 1;
        let (row, col) = self.cursor;
        self.cursor = ((row + d_row).clamp(min, max), (col + d_col).clamp(min, max));
    }

    fn drop_shape<S: KeyValueStore>(&mut self, session: &mut Session<S>, now: Instant) {
        let Some(slot) = self.selected.take() else {
            return;
        };
        let (row, col) = self.cursor;
        if placement::is_way_outside(session.grid(), row, col) {
            log::debug!("drop at ({row}, {col}) abandoned");
            return;
        }
        match session.place_shape(slot, row, col, now) {
            Ok(outcome) => self.on_placed(&outcome, now),
            Err(e) => {
                log::debug!("drop rejected: {e}");
                self.show("Doesn't fit there", now);
            }
        }
    }

    fn on_placed(&mut self, outcome: &PlacementOutcome, now: Instant) {
        if outcome.game_over {
            self.show("No moves left", now);
            return;
        }
        let Some(feedback) = outcome.feedback else {
            if outcome.new_high_score {
                self.show("New high score!", now);
            }
            return;
        };
        let mut text = format!("{} +{}", feedback.label(), outcome.points());
        // Writing to a `String` cannot fail.
        if outcome.combo > 1 {
            _ = write!(text, "  Combo x{}", outcome.combo);
        }
        if outcome.streak > 1 {
            _ = write!(text, "  Streak {}", outcome.streak);
        }
        self.show(text, now);
    }
}
