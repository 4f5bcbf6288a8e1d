use std::time::{Duration, Instant};

/// Clearing placements closer together than this extend the streak.
pub const STREAK_WINDOW: Duration = Duration::from_secs(5);

/// Tracks combo and streak counters across placements.
///
/// - **Combo** is the number of lines cleared by the most recent clearing placement.
/// - **Streak** counts consecutive clearing placements, each within
///   [`STREAK_WINDOW`] of the previous one.
///
/// A placement that clears nothing leaves both counters alone but arms a
/// decay deadline. When the host calls [`ComboTracker::tick`] after the
/// deadline and no clear has happened within the window, both counters drop
/// to zero. The tracker never reads the clock itself; callers pass `now`.
#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    combo: usize,
    streak: usize,
    best_combo: usize,
    best_streak: usize,
    last_clear_at: Option<Instant>,
    decay_deadline: Option<Instant>,
}

impl ComboTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker resumed from saved counters.
    ///
    /// The time of the last clear is not saved, so the next clear starts a
    /// new streak and the counters decay after the next miss. The best values
    /// never fall below the current ones.
    #[must_use]
    pub fn resumed(combo: usize, streak: usize, best_combo: usize, best_streak: usize) -> Self {
        Self {
            combo,
            streak,
            best_combo: best_combo.max(combo),
            best_streak: best_streak.max(streak),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn combo(&self) -> usize {
        self.combo
    }

    #[must_use]
    pub const fn streak(&self) -> usize {
        self.streak
    }

    /// Highest combo reached since the tracker was created.
    #[must_use]
    pub const fn best_combo(&self) -> usize {
        self.best_combo
    }

    /// Longest streak reached since the tracker was created.
    #[must_use]
    pub const fn best_streak(&self) -> usize {
        self.best_streak
    }

    /// Pending decay deadline, if a miss armed one.
    #[must_use]
    pub const fn decay_deadline(&self) -> Option<Instant> {
        self.decay_deadline
    }

    fn within_window(&self, now: Instant) -> bool {
        self.last_clear_at
            .is_some_and(|last| now.saturating_duration_since(last) < STREAK_WINDOW)
    }

    /// Records a placement that cleared `lines > 0` lines.
    pub fn record_clear(&mut self, lines: usize, now: Instant) {
        debug_assert!(lines > 0);
        self.combo = lines;
        self.streak = if self.within_window(now) {
            self.streak + 1
        } else {
            1
        };
        self.last_clear_at = Some(now);
        self.decay_deadline = None;
        self.best_combo = self.best_combo.max(self.combo);
        self.best_streak = self.best_streak.max(self.streak);
    }

    /// Records a placement that cleared nothing.
    ///
    /// Arms the decay deadline unless one is already pending.
    pub fn record_miss(&mut self, now: Instant) {
        self.decay_deadline.get_or_insert(now + STREAK_WINDOW);
    }

    /// Fires the decay deadline if it has passed.
    ///
    /// Returns `true` if the counters were reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.decay_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.decay_deadline = None;
        if self.within_window(now) || (self.combo == 0 && self.streak == 0) {
            return false;
        }
        self.combo = 0;
        self.streak = 0;
        true
    }
}
