use chrono::Utc;
use inkgrid_engine::{GameSession, GameSummary, SessionEvent, SessionHook, SessionSnapshot, Theme};

use crate::{
    achievements::{ACHIEVEMENTS_KEY, Achievement, AchievementSet},
    records::{HIGH_SCORE_KEY, LifetimeStats, STATS_KEY, THEME_KEY},
    saved_game::{SAVE_KEY, SAVE_VERSION, SavedGame},
    store::{KeyValueStore, StoreError, load_json, save_json},
};

fn log_failure<T>(action: &str, result: Result<T, StoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            match std::error::Error::source(&e) {
                Some(source) => log::warn!("failed to {action}: {e}: {source}"),
                None => log::warn!("failed to {action}: {e}"),
            }
            None
        }
    }
}

/// Typed, best-effort access to every persisted record.
///
/// No method returns an error: failures are logged at `warn` level and
/// reads fall back to defaults (no saved game, zero high score, empty
/// statistics, default theme).
///
/// `GameStore` is also a [`SessionHook`]. Attached to a
/// [`HookedSession`](inkgrid_engine::HookedSession), it saves the game after
/// every change while playing or paused, and on game over it deletes the
/// save, updates lifetime statistics and unlocks achievements.
#[derive(Debug)]
pub struct GameStore<S> {
    store: S,
    recently_unlocked: Vec<&'static Achievement>,
}

impl<S: KeyValueStore> GameStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            recently_unlocked: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads the saved game if there is a resumable one.
    ///
    /// Saves with a different version, finished games and unreadable
    /// records are deleted and reported as absent.
    pub fn load_saved_game(&mut self) -> Option<SavedGame> {
        let value: serde_json::Value =
            log_failure("read saved game", load_json(&self.store, SAVE_KEY))??;
        let version = value.get("version").and_then(serde_json::Value::as_u64);
        if version != Some(u64::from(SAVE_VERSION)) {
            log::info!("discarding saved game with version {version:?}");
            self.clear_saved_game();
            return None;
        }
        let saved = match serde_json::from_value::<SavedGame>(value) {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("discarding unreadable saved game: {e}");
                self.clear_saved_game();
                return None;
            }
        };
        if !saved.is_resumable() {
            log::info!("discarding saved game of a finished game");
            self.clear_saved_game();
            return None;
        }
        Some(saved)
    }

    /// Whether a resumable saved game exists. Does not modify storage.
    pub fn has_saved_game(&self) -> bool {
        let saved = load_json::<SavedGame, _>(&self.store, SAVE_KEY);
        log_failure("read saved game", saved)
            .flatten()
            .is_some_and(|saved| saved.is_resumable())
    }

    /// Saves `snapshot` if it is a playing or paused game.
    pub fn save_game(&mut self, snapshot: &SessionSnapshot) {
        if !(snapshot.status.is_playing() || snapshot.status.is_paused()) {
            return;
        }
        let saved = SavedGame::new(snapshot.clone(), Utc::now());
        log_failure(
            "write saved game",
            save_json(&mut self.store, SAVE_KEY, &saved),
        );
    }

    pub fn clear_saved_game(&mut self) {
        log_failure("remove saved game", self.store.remove(SAVE_KEY));
    }

    pub fn high_score(&self) -> usize {
        log_failure("read high score", load_json(&self.store, HIGH_SCORE_KEY))
            .flatten()
            .unwrap_or(0)
    }

    /// Stores `score` as the high score if it beats the stored one.
    pub fn save_high_score(&mut self, score: usize) {
        if score > self.high_score() {
            log_failure(
                "write high score",
                save_json(&mut self.store, HIGH_SCORE_KEY, &score),
            );
        }
    }

    pub fn lifetime_stats(&self) -> LifetimeStats {
        log_failure("read statistics", load_json(&self.store, STATS_KEY))
            .flatten()
            .unwrap_or_default()
    }

    pub fn achievements(&self) -> AchievementSet {
        let achievements = load_json(&self.store, ACHIEVEMENTS_KEY);
        log_failure("read achievements", achievements)
            .flatten()
            .unwrap_or_default()
    }

    /// Folds a finished game into lifetime statistics and unlocks any
    /// achievements it earned. Returns the newly unlocked achievements.
    pub fn record_game(&mut self, summary: &GameSummary) -> Vec<&'static Achievement> {
        let now = Utc::now();
        let mut stats = self.lifetime_stats();
        stats.record_game(summary, now);
        log_failure(
            "write statistics",
            save_json(&mut self.store, STATS_KEY, &stats),
        );

        let mut achievements = self.achievements();
        let newly = achievements.check(&stats, now);
        if !newly.is_empty() {
            log_failure(
                "write achievements",
                save_json(&mut self.store, ACHIEVEMENTS_KEY, &achievements),
            );
            for achievement in &newly {
                log::info!("achievement unlocked: {}", achievement.name);
            }
        }
        newly
    }

    /// Achievements unlocked by games that ended since the last call.
    pub fn take_unlocked(&mut self) -> Vec<&'static Achievement> {
        std::mem::take(&mut self.recently_unlocked)
    }

    /// Preferred theme, or the default theme if none is stored.
    pub fn theme(&self) -> &'static Theme {
        log_failure("read theme", load_json::<String, _>(&self.store, THEME_KEY))
            .flatten()
            .map_or(Theme::DEFAULT, |id| Theme::by_id(&id))
    }

    pub fn save_theme(&mut self, theme: &Theme) {
        log_failure(
            "write theme",
            save_json(&mut self.store, THEME_KEY, theme.id()),
        );
    }

    /// Removes every record this store knows about.
    pub fn reset_all(&mut self) {
        for key in [
            SAVE_KEY,
            HIGH_SCORE_KEY,
            STATS_KEY,
            ACHIEVEMENTS_KEY,
            THEME_KEY,
        ] {
            log_failure("remove record", self.store.remove(key));
        }
    }
}

impl<S: KeyValueStore> SessionHook for GameStore<S> {
    fn on_event(&mut self, session: &GameSession, event: &SessionEvent) {
        match event {
            SessionEvent::GameOver(summary) => {
                self.clear_saved_game();
                self.save_high_score(summary.score);
                let newly = self.record_game(summary);
                self.recently_unlocked.extend(newly);
            }
            SessionEvent::Placed(outcome) => {
                if outcome.new_high_score {
                    self.save_high_score(session.high_score());
                }
                self.save_game(&session.snapshot());
            }
            SessionEvent::ReturnedHome => {}
            SessionEvent::Started
            | SessionEvent::Restarted
            | SessionEvent::Paused
            | SessionEvent::Resumed
            | SessionEvent::Restored
            | SessionEvent::StreakDecayed => self.save_game(&session.snapshot()),
        }
    }
}
