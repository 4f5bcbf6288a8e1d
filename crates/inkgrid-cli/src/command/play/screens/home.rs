use crossterm::event::{Event, KeyCode};
use inkgrid_engine::{THEMES, Theme};
use inkgrid_store::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Padding},
};

use crate::{
    command::play::{Session, screens::Transition},
    ui::widgets::style,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Continue,
    NewGame,
    Theme,
    Quit,
}

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Continue => "Continue",
            MenuItem::NewGame => "New game",
            MenuItem::Theme => "Theme",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug)]
pub struct HomeScreen {
    items: Vec<MenuItem>,
    cursor: usize,
}

impl HomeScreen {
    pub fn new<S: KeyValueStore>(session: &Session<S>) -> Self {
        let has_save = session.hook().has_saved_game();
        let mut items = Vec::with_capacity(4);
        if has_save {
            items.push(MenuItem::Continue);
        }
        items.extend([MenuItem::NewGame, MenuItem::Theme, MenuItem::Quit]);
        Self { items, cursor: 0 }
    }

    fn current(&self) -> MenuItem {
        self.items[self.cursor]
    }

    pub fn draw<S>(&self, session: &Session<S>, frame: &mut Frame<'_>) {
        let theme = session.theme();
        let mut lines = vec![
            Line::styled("I N K G R I D", style::HIGHLIGHT).centered(),
            Line::default(),
        ];
        for (i, item) in self.items.iter().enumerate() {
            let marker = if i == self.cursor { "> " } else { "  " };
            let text = match item {
                MenuItem::Theme => format!("{marker}{}: < {} >", item.label(), theme.name()),
                _ => format!("{marker}{}", item.label()),
            };
            let item_style = if i == self.cursor {
                style::HIGHLIGHT
            } else {
                style::DEFAULT
            };
            lines.push(Line::styled(text, item_style).centered());
        }
        lines.push(Line::default());
        lines.push(theme_sample(theme).centered());
        lines.push(Line::default());
        let high_score = format!("High score: {}", session.high_score());
        lines.push(Line::styled(high_score, style::LABEL).centered());

        let help_text = "Controls: ↑ ↓ (Select) | ← → (Theme) | Enter | Q (Quit)";
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
        let [menu_area, help_area] =
            Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
                .areas::<2>(frame.area());
        let menu_area = menu_area.centered_horizontally(Constraint::Length(40));
        let block = Block::bordered()
            .padding(Padding::horizontal(1))
            .style(style::DEFAULT);
        frame.render_widget(Text::from(lines).centered(), block.inner(menu_area));
        frame.render_widget(block, menu_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        event: &Event,
    ) -> Option<Transition> {
        let event = event.as_key_press_event()?;
        match event.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(self.items.len() - 1),
            KeyCode::Left if self.current() == MenuItem::Theme => cycle_theme(session, -1),
            KeyCode::Right if self.current() == MenuItem::Theme => cycle_theme(session, 1),
            KeyCode::Char('t') => cycle_theme(session, 1),
            KeyCode::Char('n') => return Some(new_game(session)),
            KeyCode::Char('c') if self.items.contains(&MenuItem::Continue) => {
                return Some(continue_game(session));
            }
            KeyCode::Char('q') | KeyCode::Esc => return Some(Transition::Exit),
            KeyCode::Enter => {
                return match self.current() {
                    MenuItem::Continue => Some(continue_game(session)),
                    MenuItem::NewGame => Some(new_game(session)),
                    MenuItem::Theme => {
                        cycle_theme(session, 1);
                        None
                    }
                    MenuItem::Quit => Some(Transition::Exit),
                };
            }
            _ => {}
        }
        None
    }
}

/// Resumes the saved game, keeping the theme picked on this screen.
///
/// Goes back home (refreshing the menu) if the save is gone or unusable.
fn continue_game<S: KeyValueStore>(session: &mut Session<S>) -> Transition {
    let Some(mut saved) = session.hook_mut().load_saved_game() else {
        return Transition::Home;
    };
    saved.snapshot.theme = session.theme().id().to_owned();
    match session.restore(saved.snapshot) {
        Ok(()) => Transition::Play,
        Err(e) => {
            log::warn!("cannot resume saved game: {e}");
            session.hook_mut().clear_saved_game();
            Transition::Home
        }
    }
}

fn new_game<S: KeyValueStore>(session: &mut Session<S>) -> Transition {
    session.start_game();
    Transition::Play
}

fn cycle_theme<S: KeyValueStore>(session: &mut Session<S>, step: isize) {
    let current = THEMES
        .iter()
        .position(|theme| theme.id() == session.theme().id())
        .unwrap_or(0);
    let next = current.saturating_add_signed(step + THEMES.len().cast_signed()) % THEMES.len();
    let theme = &THEMES[next];
    session.set_theme(theme);
    session.hook_mut().save_theme(theme);
    log::debug!("theme changed to {}", theme.id());
}

/// Each colour of the theme, drawn with one of its symbols.
fn theme_sample(theme: &Theme) -> Line<'static> {
    let spans = theme
        .colors()
        .iter()
        .zip(theme.symbols().iter().cycle())
        .map(|(rgb, symbol)| {
            Span::styled(
                format!(" {symbol}"),
                Style::new().fg(Color::Rgb(rgb.r, rgb.g, rgb.b)),
            )
        });
    Line::from_iter(spans)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use inkgrid_engine::{GameConfig, GameSession, GameStatus, HookedSession};
    use inkgrid_store::{GameStore, MemoryStore};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn new_session(store: MemoryStore) -> Session<MemoryStore> {
        let session = GameSession::new(GameConfig::default());
        HookedSession::new(session, GameStore::new(store))
    }

    #[test]
    fn test_menu_without_save() {
        let session = new_session(MemoryStore::new());
        let screen = HomeScreen::new(&session);
        assert_eq!(
            screen.items,
            [MenuItem::NewGame, MenuItem::Theme, MenuItem::Quit]
        );
    }

    #[test]
    fn test_theme_cycle_wraps_and_persists() {
        let mut session = new_session(MemoryStore::new());
        let mut screen = HomeScreen::new(&session);

        screen.handle_event(&mut session, &key(KeyCode::Down));
        assert_eq!(screen.current(), MenuItem::Theme);
        screen.handle_event(&mut session, &key(KeyCode::Left));

        let last = &THEMES[THEMES.len() - 1];
        assert_eq!(session.theme().id(), last.id());
        assert_eq!(session.hook().theme().id(), last.id());

        screen.handle_event(&mut session, &key(KeyCode::Right));
        assert_eq!(session.theme().id(), Theme::DEFAULT.id());
    }

    #[test]
    fn test_continue_restores_saved_game() {
        let mut first = new_session(MemoryStore::new());
        first.start_game();
        first.toggle_pause();
        let snapshot = first.snapshot();
        let store = first.into_parts().1.into_inner();

        let mut session = new_session(store);
        let mut screen = HomeScreen::new(&session);
        assert_eq!(screen.current(), MenuItem::Continue);

        let transition = screen.handle_event(&mut session, &key(KeyCode::Enter));
        assert_eq!(transition, Some(Transition::Play));
        assert_eq!(session.status(), GameStatus::Paused);
        assert_eq!(session.grid(), &snapshot.grid);
        assert_eq!(session.tray(), &snapshot.tray);
    }

    #[test]
    fn test_continue_saves_chosen_theme() {
        let mut first = new_session(MemoryStore::new());
        first.start_game();
        let store = first.into_parts().1.into_inner();

        let mut session = new_session(store);
        let mut screen = HomeScreen::new(&session);
        screen.handle_event(&mut session, &key(KeyCode::Char('t')));
        let chosen = session.theme().id();
        assert_ne!(chosen, Theme::DEFAULT.id());

        let transition = screen.handle_event(&mut session, &key(KeyCode::Char('c')));
        assert_eq!(transition, Some(Transition::Play));
        assert_eq!(session.theme().id(), chosen);
        let saved = session.hook_mut().load_saved_game().unwrap();
        assert_eq!(saved.snapshot.theme, chosen);
    }

    #[test]
    fn test_new_game_starts_playing() {
        let mut session = new_session(MemoryStore::new());
        let mut screen = HomeScreen::new(&session);

        let transition = screen.handle_event(&mut session, &key(KeyCode::Char('n')));
        assert_eq!(transition, Some(Transition::Play));
        assert!(session.status().is_playing());
        assert!(session.hook().has_saved_game());
    }
}
