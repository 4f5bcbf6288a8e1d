use std::{ops::Deref, time::Instant};

use crate::{PlacementError, RestoreError, core::Theme};

use super::game_session::{GameSession, GameSummary, PlacementOutcome, SessionSnapshot};

/// A committed change to a [`GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionEvent {
    Started,
    Restarted,
    Paused,
    Resumed,
    Restored,
    Placed(Box<PlacementOutcome>),
    StreakDecayed,
    GameOver(GameSummary),
    ReturnedHome,
}

/// Observer called after every committed session change.
///
/// The session has already been updated when the hook runs, so the hook
/// sees the new state. Hooks cannot fail; anything that goes wrong inside
/// one is the hook's own business.
pub trait SessionHook {
    fn on_event(&mut self, session: &GameSession, event: &SessionEvent);
}

impl SessionHook for () {
    fn on_event(&mut self, _session: &GameSession, _event: &SessionEvent) {}
}

impl<H: SessionHook + ?Sized> SessionHook for &mut H {
    fn on_event(&mut self, session: &GameSession, event: &SessionEvent) {
        (**self).on_event(session, event);
    }
}

/// A [`GameSession`] that reports every committed change to a [`SessionHook`].
///
/// Rejected intents (an illegal placement, pausing on the start screen, a
/// restart while paused) change nothing and report nothing.
#[derive(Debug)]
pub struct HookedSession<H> {
    session: GameSession,
    hook: H,
}

/// Read-only access to the wrapped session.
///
/// There is deliberately no `DerefMut`: mutations must go through the
/// wrapper so that the hook sees them.
impl<H> Deref for HookedSession<H> {
    type Target = GameSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl<H: SessionHook> HookedSession<H> {
    pub fn new(session: GameSession, hook: H) -> Self {
        Self { session, hook }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn into_parts(self) -> (GameSession, H) {
        (self.session, self.hook)
    }

    fn emit(&mut self, event: SessionEvent) {
        self.hook.on_event(&self.session, &event);
    }

    fn emit_game_over_if_ended(&mut self) {
        if self.session.status().is_game_over() {
            let summary = self.session.summary();
            self.emit(SessionEvent::GameOver(summary));
        }
    }

    /// Changes the theme for future draws. Not a session transition.
    pub fn set_theme(&mut self, theme: &'static Theme) {
        self.session.set_theme(theme);
    }

    pub fn start_game(&mut self) {
        self.session.start_game();
        self.emit(SessionEvent::Started);
        self.emit_game_over_if_ended();
    }

    pub fn restart(&mut self) -> bool {
        if !self.session.restart() {
            return false;
        }
        self.emit(SessionEvent::Restarted);
        self.emit_game_over_if_ended();
        true
    }

    pub fn toggle_pause(&mut self) {
        let before = self.session.status();
        self.session.toggle_pause();
        match (before.is_paused(), self.session.status().is_paused()) {
            (false, true) => self.emit(SessionEvent::Paused),
            (true, false) => self.emit(SessionEvent::Resumed),
            _ => {}
        }
    }

    pub fn return_home(&mut self) {
        self.session.return_home();
        self.emit(SessionEvent::ReturnedHome);
    }

    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), RestoreError> {
        self.session.restore(snapshot)?;
        self.emit(SessionEvent::Restored);
        Ok(())
    }

    pub fn place_shape(
        &mut self,
        slot: usize,
        row: isize,
        col: isize,
        now: Instant,
    ) -> Result<PlacementOutcome, PlacementError> {
        let outcome = self.session.place_shape(slot, row, col, now)?;
        self.emit(SessionEvent::Placed(Box::new(outcome.clone())));
        if outcome.game_over {
            self.emit_game_over_if_ended();
        }
        Ok(outcome)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let reset = self.session.tick(now);
        if reset {
            self.emit(SessionEvent::StreakDecayed);
        }
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, GameStatus, Grid, Ink, Rgb, Shape, ShapeId, ShapeLayout, Tray};

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<(SessionEvent, GameStatus)>,
    }

    impl SessionHook for Recorder {
        fn on_event(&mut self, session: &GameSession, event: &SessionEvent) {
            self.events.push((event.clone(), session.status()));
        }
    }

    fn single() -> Shape {
        Shape::new(
            ShapeId(1),
            ShapeLayout::from_pattern("1"),
            Ink::new(Rgb::from_hex(0x22_5544), '●'),
        )
    }

    #[test]
    fn test_events_follow_transitions() {
        let mut session =
            HookedSession::new(GameSession::new(GameConfig::default()), Recorder::default());
        session.toggle_pause();
        assert!(
            session.hook().events.is_empty(),
            "pause on the start screen is ignored"
        );

        session.start_game();
        session.toggle_pause();
        assert!(!session.restart());
        session.toggle_pause();
        assert!(session.restart());
        session.return_home();

        assert_eq!(
            session.hook().events,
            [
                (SessionEvent::Started, GameStatus::Playing),
                (SessionEvent::Paused, GameStatus::Paused),
                (SessionEvent::Resumed, GameStatus::Playing),
                (SessionEvent::Restarted, GameStatus::Playing),
                (SessionEvent::ReturnedHome, GameStatus::Start),
            ]
        );
    }

    #[test]
    fn test_game_over_is_reported_after_placement() {
        // Only the centre and the corners are empty; no two empty cells touch.
        let mut grid = Grid::new(3);
        let ink = single().ink();
        for (row, col) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            grid.set(row, col, Some(ink)).unwrap();
        }
        let config = GameConfig {
            grid_size: 3,
            ..GameConfig::default()
        };
        let mut session = HookedSession::new(GameSession::new(config), Recorder::default());
        session
            .restore(SessionSnapshot {
                grid,
                score: 5,
                tray: Tray::new([
                    Some(single()),
                    Some(Shape::new(ShapeId(2), ShapeLayout::from_pattern("11"), ink)),
                    None,
                ]),
                combo: 0,
                streak: 0,
                best_combo: 0,
                best_streak: 0,
                blocks_placed_this_game: 0,
                lines_cleared_this_game: 0,
                theme: "classic".to_owned(),
                status: GameStatus::Playing,
            })
            .unwrap();

        let before = session.hook().events.len();
        assert!(session.place_shape(0, 0, 1, Instant::now()).is_err());
        assert_eq!(
            session.hook().events.len(),
            before,
            "rejected placement reports nothing"
        );

        // Filling a corner completes no line, and the 1x2 fits nowhere.
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert!(outcome.game_over);

        let (session, recorder) = session.into_parts();
        let kinds: Vec<_> = recorder.events.iter().map(|(e, _)| e.clone()).collect();
        assert!(kinds[0].is_restored());
        assert!(kinds[1].is_placed());
        assert_eq!(kinds[2], SessionEvent::GameOver(session.summary()));
        assert_eq!(kinds.len(), 3);
    }
}
