use std::time::Instant;

use crossterm::event::Event;
use inkgrid_store::KeyValueStore;
use ratatui::Frame;

use crate::command::play::{
    Session,
    screens::{home::HomeScreen, play::PlayScreen},
};

mod home;
mod play;

/// Where the app should go after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Home,
    Play,
    Exit,
}

#[derive(Debug)]
pub enum Screen {
    Home(HomeScreen),
    Play(PlayScreen),
}

impl Screen {
    pub fn home<S: KeyValueStore>(session: &Session<S>) -> Self {
        Screen::Home(HomeScreen::new(session))
    }

    pub fn play() -> Self {
        Screen::Play(PlayScreen::new())
    }

    pub fn draw<S>(&self, session: &Session<S>, frame: &mut Frame<'_>) {
        match self {
            Screen::Home(screen) => screen.draw(session, frame),
            Screen::Play(screen) => screen.draw(session, frame),
        }
    }

    pub fn handle_event<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        event: &Event,
        now: Instant,
    ) -> Option<Transition> {
        match self {
            Screen::Home(screen) => screen.handle_event(session, event),
            Screen::Play(screen) => screen.handle_event(session, event, now),
        }
    }

    pub fn update<S: KeyValueStore>(&mut self, session: &mut Session<S>, now: Instant) {
        match self {
            Screen::Home(_) => {}
            Screen::Play(screen) => screen.update(session, now),
        }
    }
}
