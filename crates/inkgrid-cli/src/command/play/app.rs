use std::time::{Duration, Instant};

use crossterm::event::Event;
use inkgrid_store::KeyValueStore;
use ratatui::Frame;

use crate::{
    command::play::{
        Session,
        screens::{Screen, Transition},
    },
    tui::{App, Tui},
};

/// How often the streak timer and messages are checked.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct PlayApp<S> {
    session: Session<S>,
    screen: Screen,
    is_exiting: bool,
}

impl<S: KeyValueStore> PlayApp<S> {
    /// Opens on the home screen, or straight into a new game when `new_game` is set.
    pub fn new(mut session: Session<S>, new_game: bool) -> Self {
        let screen = if new_game {
            session.start_game();
            Screen::play()
        } else {
            Screen::home(&session)
        };
        Self {
            session,
            screen,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Home => self.screen = Screen::home(&self.session),
            Transition::Play => self.screen = Screen::play(),
            Transition::Exit => self.is_exiting = true,
        }
    }
}

impl<S: KeyValueStore> App for PlayApp<S> {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(TICK_INTERVAL));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        let now = Instant::now();
        if let Some(transition) = self.screen.handle_event(&mut self.session, event, now) {
            self.apply(transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(&self.session, frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update(&mut self.session, Instant::now());
    }
}
