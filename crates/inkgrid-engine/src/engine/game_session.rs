use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{
    PlacementError, RestoreError,
    core::{GRID_SIZE, Grid, Theme},
};

use super::{
    GameStats,
    combo::ComboTracker,
    line_clear::{ClearedLines, FeedbackTier, clear_points},
    placement,
    shape_generator::{ShapeGenerator, ShapeSeed},
    tray::{TRAY_SLOTS, Tray},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Settings fixed for the lifetime of a [`GameSession`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid_size: usize,
    /// Theme used for drawing shapes until [`GameSession::set_theme`] changes it.
    pub theme: &'static Theme,
    /// Seed for shape generation; random when `None`.
    pub seed: Option<ShapeSeed>,
    /// Run the game-over check after placements that cleared lines even if
    /// the tray was not refilled.
    ///
    /// When `false`, a clearing placement that leaves shapes in the tray
    /// skips the check until the next placement.
    pub recheck_after_clear: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            theme: Theme::DEFAULT,
            seed: None,
            recheck_after_clear: true,
        }
    }
}

/// What a successful placement did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub cells_placed: usize,
    pub placement_points: usize,
    pub cleared: ClearedLines,
    pub clear_points: usize,
    pub feedback: Option<FeedbackTier>,
    pub combo: usize,
    pub streak: usize,
    pub new_high_score: bool,
    pub refilled: bool,
    pub game_over: bool,
}

impl PlacementOutcome {
    /// Total points earned by the placement.
    #[must_use]
    pub fn points(&self) -> usize {
        self.placement_points + self.clear_points
    }
}

/// Serializable state of an in-progress game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub score: usize,
    pub tray: Tray,
    pub combo: usize,
    pub streak: usize,
    /// Highest combo of the game so far. Missing in older saves.
    #[serde(default)]
    pub best_combo: usize,
    #[serde(default)]
    pub best_streak: usize,
    pub blocks_placed_this_game: usize,
    pub lines_cleared_this_game: usize,
    pub theme: String,
    pub status: GameStatus,
}

/// Figures recorded when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: usize,
    pub lines_cleared: usize,
    pub blocks_placed: usize,
    pub best_combo: usize,
    pub best_streak: usize,
}

/// A single game, from the start screen to game over.
///
/// The session is the only owner of the grid, tray, score and counters, and
/// every change goes through one of its intent methods:
///
/// - [`start_game`](Self::start_game) from any state
/// - [`restart`](Self::restart) while playing
/// - [`toggle_pause`](Self::toggle_pause) between playing and paused
/// - [`place_shape`](Self::place_shape) while playing
/// - [`return_home`](Self::return_home) from any state
/// - [`tick`](Self::tick) to let the combo and streak decay
///
/// Time is passed in by the caller; the session never reads the clock.
///
/// # Example
///
/// ```
/// use std::time::Instant;
///
/// use inkgrid_engine::{GameConfig, GameSession, legal_anchors};
///
/// let mut session = GameSession::new(GameConfig::default());
/// session.start_game();
///
/// let shape = session.tray().get(0).unwrap().clone();
/// let (row, col) = legal_anchors(session.grid(), shape.layout())
///     .next()
///     .unwrap();
/// let (row, col) = (isize::try_from(row)?, isize::try_from(col)?);
/// let outcome = session.place_shape(0, row, col, Instant::now())?;
/// assert_eq!(outcome.placement_points, shape.cell_count() * 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    theme: &'static Theme,
    generator: ShapeGenerator,
    grid: Grid,
    tray: Tray,
    stats: GameStats,
    combo: ComboTracker,
    status: GameStatus,
    high_score: usize,
}

impl GameSession {
    /// Creates a session on the start screen.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let generator = config
            .seed
            .map_or_else(ShapeGenerator::new, ShapeGenerator::with_seed);
        Self {
            theme: config.theme,
            generator,
            grid: Grid::new(config.grid_size),
            tray: Tray::default(),
            stats: GameStats::new(),
            combo: ComboTracker::new(),
            status: GameStatus::Start,
            high_score: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    /// Changes the theme used for shapes drawn from now on.
    pub fn set_theme(&mut self, theme: &'static Theme) {
        self.theme = theme;
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score
    }

    /// Seeds the high score from a stored record. Never lowers it.
    pub fn set_high_score(&mut self, high_score: usize) {
        self.high_score = self.high_score.max(high_score);
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.stats.score(),
            lines_cleared: self.stats.lines_cleared(),
            blocks_placed: self.stats.blocks_placed(),
            best_combo: self.combo.best_combo(),
            best_streak: self.combo.best_streak(),
        }
    }

    /// Starts a fresh game: empty grid, full tray, everything else zeroed.
    pub fn start_game(&mut self) {
        self.grid = Grid::new(self.config.grid_size);
        self.tray = Tray::drawn(&mut self.generator, self.theme);
        self.stats = GameStats::new();
        self.combo = ComboTracker::new();
        self.status = GameStatus::Playing;
        log::info!("game started (theme: {})", self.theme.id());
        if !placement::can_place_any(&self.grid, &self.tray) {
            // Only possible on grids smaller than the largest layout.
            self.end_game();
        }
    }

    /// Discards the current game and starts a new one. Only while playing.
    ///
    /// Returns whether the restart happened.
    pub fn restart(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        log::debug!("restarting game at score {}", self.score());
        self.start_game();
        true
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            status @ (GameStatus::Start | GameStatus::GameOver) => status,
        };
        log::debug!("status is now {:?}", self.status);
    }

    /// Goes back to the start screen, leaving the board as it was.
    pub fn return_home(&mut self) {
        log::debug!("returning home from {:?}", self.status);
        self.status = GameStatus::Start;
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        log::info!(
            "game over: score {}, {} lines, {} blocks",
            self.stats.score(),
            self.stats.lines_cleared(),
            self.stats.blocks_placed()
        );
    }

    /// Returns whether the shape in `slot` could be placed at `(row, col)`.
    #[must_use]
    pub fn can_place(&self, slot: usize, row: isize, col: isize) -> bool {
        self.tray
            .get(slot)
            .is_some_and(|shape| placement::can_place_at(&self.grid, shape.layout(), row, col))
    }

    /// Lines the shape in `slot` would clear at `(row, col)`.
    #[must_use]
    pub fn potential_lines(&self, slot: usize, row: isize, col: isize) -> ClearedLines {
        self.tray
            .get(slot)
            .map_or_else(ClearedLines::default, |shape| {
                placement::potential_lines(&self.grid, shape.layout(), row, col)
            })
    }

    /// Places the shape in `slot` with its top-left corner at `(row, col)`.
    ///
    /// Effects apply in this order: the shape is stamped, placement points
    /// are added, full lines are cleared and scored, the slot is emptied, the
    /// tray is refilled if it became empty, and finally the game ends if no
    /// remaining shape fits anywhere.
    ///
    /// A rejected placement changes nothing.
    pub fn place_shape(
        &mut self,
        slot: usize,
        row: isize,
        col: isize,
        now: Instant,
    ) -> Result<PlacementOutcome, PlacementError> {
        if !self.status.is_playing() {
            return Err(PlacementError::NotPlaying);
        }
        if slot >= TRAY_SLOTS {
            return Err(PlacementError::SlotOutOfRange { slot });
        }
        let shape = self
            .tray
            .get(slot)
            .ok_or(PlacementError::EmptySlot { slot })?;
        let cells_placed = placement::stamp(&mut self.grid, shape, row, col)?;
        let placement_points = self.stats.record_placement(cells_placed);

        let cleared = ClearedLines::find(&self.grid);
        cleared.apply(&mut self.grid);
        let lines = cleared.count();
        let clear_points = clear_points(lines);
        self.stats.record_clear(lines, clear_points);
        if lines > 0 {
            self.combo.record_clear(lines, now);
        } else {
            self.combo.record_miss(now);
        }

        let new_high_score = self.stats.score() > self.high_score;
        if new_high_score {
            self.high_score = self.stats.score();
        }

        self.tray.take(slot);
        let refilled = self.tray.refill_if_empty(&mut self.generator, self.theme);

        log::debug!(
            "placed {cells_placed} cells at ({row}, {col}), cleared {lines} lines, score {}",
            self.stats.score()
        );

        let check = self.config.recheck_after_clear || refilled || lines == 0;
        let game_over = check && !placement::can_place_any(&self.grid, &self.tray);
        if game_over {
            self.end_game();
        }

        Ok(PlacementOutcome {
            cells_placed,
            placement_points,
            cleared,
            clear_points,
            feedback: FeedbackTier::from_lines(lines),
            combo: self.combo.combo(),
            streak: self.combo.streak(),
            new_high_score,
            refilled,
            game_over,
        })
    }

    /// Lets the combo and streak decay once the quiet period has passed.
    ///
    /// Returns `true` if the counters were reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !(self.status.is_playing() || self.status.is_paused()) {
            return false;
        }
        let reset = self.combo.tick(now);
        if reset {
            log::debug!("combo and streak decayed");
        }
        reset
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid.clone(),
            score: self.stats.score(),
            tray: self.tray.clone(),
            combo: self.combo.combo(),
            streak: self.combo.streak(),
            best_combo: self.combo.best_combo(),
            best_streak: self.combo.best_streak(),
            blocks_placed_this_game: self.stats.blocks_placed(),
            lines_cleared_this_game: self.stats.lines_cleared(),
            theme: self.theme.id().to_owned(),
            status: self.status,
        }
    }

    /// Resumes a saved game.
    ///
    /// Only playing or paused snapshots whose grid matches the configured
    /// size are accepted. On error the session is unchanged.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), RestoreError> {
        if !(snapshot.status.is_playing() || snapshot.status.is_paused()) {
            return Err(RestoreError::NotResumable {
                status: snapshot.status,
            });
        }
        if snapshot.grid.size() != self.config.grid_size {
            return Err(RestoreError::GridSizeMismatch {
                expected: self.config.grid_size,
                found: snapshot.grid.size(),
            });
        }
        self.theme = Theme::by_id(&snapshot.theme);
        self.grid = snapshot.grid;
        self.tray = snapshot.tray;
        self.stats = GameStats::resumed(
            snapshot.score,
            snapshot.blocks_placed_this_game,
            snapshot.lines_cleared_this_game,
        );
        self.combo = ComboTracker::resumed(
            snapshot.combo,
            snapshot.streak,
            snapshot.best_combo,
            snapshot.best_streak,
        );
        self.high_score = self.high_score.max(snapshot.score);
        self.status = snapshot.status;
        self.tray.refill_if_empty(&mut self.generator, self.theme);
        log::info!(
            "resumed {:?} game at score {}",
            self.status,
            self.stats.score()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{Ink, Rgb, Shape, ShapeId, ShapeLayout};

    const INK: Ink = Ink::new(Rgb::from_hex(0x7b_341e), '■');

    fn grid_from(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(rows.len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set(r, c, Some(INK)).unwrap();
                }
            }
        }
        grid
    }

    fn shape(pattern: &str) -> Shape {
        Shape::new(ShapeId(0), ShapeLayout::from_pattern(pattern), INK)
    }

    fn tray(patterns: [Option<&str>; 3]) -> Tray {
        Tray::new(patterns.map(|p| p.map(shape)))
    }

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(ShapeSeed::from_bytes([9; 16])),
            ..GameConfig::default()
        }
    }

    fn playing(grid: Grid, tray: Tray, config: GameConfig) -> GameSession {
        let mut session = GameSession::new(config);
        session
            .restore(SessionSnapshot {
                grid,
                score: 0,
                tray,
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
        session
    }

    const EMPTY: [&str; 8] = ["........"; 8];

    const ODD: &str = ".#.#.#.#";
    const EVEN: &str = "#.#.#.#.";
    // Empty cells only where row + col is even: no two empty cells touch.
    const CHECKERBOARD: [&str; 8] = [ODD, EVEN, ODD, EVEN, ODD, EVEN, ODD, EVEN];

    #[test]
    fn test_new_session_is_on_start_screen() {
        let mut session = GameSession::new(config());
        assert!(session.status().is_start());
        assert!(session.tray().is_empty());
        assert_eq!(
            session.place_shape(0, 0, 0, Instant::now()),
            Err(PlacementError::NotPlaying)
        );
    }

    #[test]
    fn test_start_game() {
        let mut session = GameSession::new(config());
        session.start_game();
        assert!(session.status().is_playing());
        assert!(session.grid().is_empty());
        assert_eq!(session.tray().shapes().count(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo().combo(), 0);
        assert_eq!(session.combo().streak(), 0);
    }

    #[test]
    fn test_place_without_clear() {
        let mut session = playing(
            grid_from(&EMPTY),
            tray([Some("111"), Some("1"), Some("1")]),
            config(),
        );
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert_eq!(outcome.points(), 30);
        assert!(outcome.cleared.is_empty());
        assert_eq!(outcome.feedback, None);
        assert!(!outcome.game_over);
        assert!(!outcome.refilled);
        assert_eq!(session.score(), 30);
        assert_eq!(session.grid().occupied_count(), 3);
        assert_eq!(session.stats().blocks_placed(), 3);
        assert_eq!(session.tray().get(0), None);
    }

    #[test]
    fn test_place_clears_single_row() {
        let mut rows = EMPTY;
        rows[3] = "#######.";
        let mut session = playing(
            grid_from(&rows),
            tray([Some("1"), Some("1"), Some("1")]),
            config(),
        );
        let outcome = session.place_shape(0, 3, 7, Instant::now()).unwrap();
        assert_eq!(outcome.points(), 110);
        assert_eq!(outcome.cleared.rows(), [3]);
        assert_eq!(outcome.combo, 1);
        assert_eq!(outcome.feedback, Some(FeedbackTier::InkPurge));
        assert!(session.grid().is_empty());
        assert_eq!(session.stats().lines_cleared(), 1);
    }

    #[test]
    fn test_place_clears_two_rows() {
        let mut rows = EMPTY;
        rows[0] = "#######.";
        rows[1] = "#######.";
        let mut session = playing(
            grid_from(&rows),
            tray([Some("1/1"), Some("1"), Some("1")]),
            config(),
        );
        let outcome = session.place_shape(0, 0, 7, Instant::now()).unwrap();
        assert_eq!(outcome.cleared.rows(), [0, 1]);
        assert!(outcome.cleared.cols().is_empty());
        assert_eq!(outcome.clear_points, 800);
        assert_eq!(outcome.placement_points, 20);
        assert_eq!(outcome.feedback, Some(FeedbackTier::Masterful));
        assert_eq!(outcome.combo, 2);
        assert_eq!(session.score(), 820);
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_place_clears_rows_and_column() {
        let mut rows = ["#......."; 8];
        rows[0] = ".#######";
        rows[1] = ".#######";
        let grid = grid_from(&rows);
        let mut session = playing(grid, tray([Some("1/1"), Some("1"), Some("1")]), config());
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert_eq!(outcome.clear_points, 1200);
        assert_eq!(outcome.placement_points, 20);
        assert_eq!(session.score(), 1220);
        assert_eq!(outcome.combo, 3);
        assert_eq!(outcome.feedback.map(FeedbackTier::label), Some("Sublime!"));
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_streak_window_across_placements() {
        let mut rows = EMPTY;
        rows[0] = "#######.";
        rows[1] = "#######.";
        rows[2] = "#######.";
        let mut session = playing(
            grid_from(&rows),
            tray([Some("1"), Some("1"), Some("1")]),
            config(),
        );
        let t0 = Instant::now();
        assert_eq!(session.place_shape(0, 0, 7, t0).unwrap().streak, 1);

        let outcome = session
            .place_shape(1, 1, 7, t0 + Duration::from_secs(2))
            .unwrap();
        assert_eq!(outcome.streak, 2);

        let outcome = session
            .place_shape(2, 2, 7, t0 + Duration::from_secs(8))
            .unwrap();
        assert_eq!(outcome.cleared.rows(), [2]);
        assert_eq!(outcome.streak, 1, "6 seconds after the previous clear");
        assert_eq!(session.summary().best_streak, 2);
    }

    #[test]
    fn test_streak_decays_after_quiet_period() {
        let mut rows = EMPTY;
        rows[0] = "#######.";
        let mut session = playing(
            grid_from(&rows),
            tray([Some("1"), Some("1"), Some("1")]),
            config(),
        );
        let t0 = Instant::now();
        session.place_shape(0, 0, 7, t0).unwrap();
        session
            .place_shape(1, 5, 5, t0 + Duration::from_secs(1))
            .unwrap();
        assert!(!session.tick(t0 + Duration::from_secs(3)));
        assert_eq!(session.combo().combo(), 1);
        assert!(session.tick(t0 + Duration::from_secs(6)));
        assert_eq!(session.combo().combo(), 0);
        assert_eq!(session.combo().streak(), 0);
        assert_eq!(session.summary().best_combo, 1);
    }

    #[test]
    fn test_game_over_when_nothing_fits() {
        let mut session = playing(
            grid_from(&CHECKERBOARD),
            tray([Some("1"), Some("11"), Some("1/1")]),
            config(),
        );
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert!(outcome.cleared.is_empty());
        assert!(outcome.game_over);
        assert!(session.status().is_game_over());
        assert_eq!(
            session.place_shape(1, 0, 0, Instant::now()),
            Err(PlacementError::NotPlaying)
        );
    }

    #[test]
    fn test_refill_happens_before_game_over_check() {
        let mut session = playing(
            grid_from(&CHECKERBOARD),
            tray([Some("1"), None, None]),
            config(),
        );
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert!(outcome.refilled);
        assert_eq!(session.tray().shapes().count(), 3);
        let fits = session
            .tray()
            .shapes()
            .any(|s| placement::can_place_anywhere(session.grid(), s.layout()));
        assert_eq!(outcome.game_over, !fits);
    }

    fn stuck_after_clear() -> (Grid, Tray) {
        let mut rows = CHECKERBOARD;
        rows[0] = ".#######";
        (
            grid_from(&rows),
            tray([Some("1"), Some("111/111/111"), Some("111/111/111")]),
        )
    }

    #[test]
    fn test_recheck_after_clear() {
        let (grid, tray) = stuck_after_clear();
        let mut session = playing(grid, tray, config());
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert_eq!(outcome.cleared.rows(), [0]);
        assert!(outcome.game_over);
    }

    #[test]
    fn test_no_recheck_after_clear() {
        let (grid, tray) = stuck_after_clear();
        let config = GameConfig {
            recheck_after_clear: false,
            ..config()
        };
        let mut session = playing(grid, tray, config);
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert_eq!(outcome.cleared.rows(), [0]);
        assert!(!outcome.game_over);
        assert!(session.status().is_playing());
    }

    #[test]
    fn test_rejected_placements_do_not_mutate() {
        let mut rows = EMPTY;
        rows[0] = "#.......";
        let mut session = playing(
            grid_from(&rows),
            tray([Some("11"), None, Some("1")]),
            config(),
        );
        let before = session.snapshot();
        let now = Instant::now();
        assert_eq!(
            session.place_shape(0, 0, 0, now),
            Err(PlacementError::InvalidPlacement { row: 0, col: 0 })
        );
        assert_eq!(
            session.place_shape(0, 0, 7, now),
            Err(PlacementError::InvalidPlacement { row: 0, col: 7 })
        );
        assert_eq!(
            session.place_shape(0, -1, 3, now),
            Err(PlacementError::InvalidPlacement { row: -1, col: 3 })
        );
        assert_eq!(
            session.place_shape(1, 3, 3, now),
            Err(PlacementError::EmptySlot { slot: 1 })
        );
        assert_eq!(
            session.place_shape(3, 3, 3, now),
            Err(PlacementError::SlotOutOfRange { slot: 3 })
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_pause_blocks_placement() {
        let mut session = playing(grid_from(&EMPTY), tray([Some("1"), None, None]), config());
        session.toggle_pause();
        assert!(session.status().is_paused());
        assert_eq!(
            session.place_shape(0, 0, 0, Instant::now()),
            Err(PlacementError::NotPlaying)
        );
        session.toggle_pause();
        assert!(session.status().is_playing());
        assert!(session.place_shape(0, 0, 0, Instant::now()).is_ok());
    }

    #[test]
    fn test_restart_only_while_playing() {
        let mut session = playing(grid_from(&EMPTY), tray([Some("111"), None, None]), config());
        session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert!(session.score() > 0);

        session.toggle_pause();
        assert!(!session.restart());
        assert!(session.score() > 0);

        session.toggle_pause();
        assert!(session.restart());
        assert_eq!(session.score(), 0);
        assert!(session.grid().is_empty());
        assert_eq!(session.tray().shapes().count(), 3);
    }

    #[test]
    fn test_return_home_and_start_again() {
        let mut session = playing(
            grid_from(&CHECKERBOARD),
            tray([Some("1"), Some("11"), None]),
            config(),
        );
        session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert!(session.status().is_game_over());
        session.toggle_pause();
        assert!(
            session.status().is_game_over(),
            "pause has no effect after game over"
        );

        session.return_home();
        assert!(session.status().is_start());
        session.start_game();
        assert!(session.status().is_playing());
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_high_score() {
        let mut session = playing(
            grid_from(&EMPTY),
            tray([Some("111"), Some("1"), None]),
            config(),
        );
        session.set_high_score(35);
        let outcome = session.place_shape(0, 0, 0, Instant::now()).unwrap();
        assert!(!outcome.new_high_score);
        assert_eq!(session.high_score(), 35);
        let outcome = session.place_shape(1, 5, 5, Instant::now()).unwrap();
        assert!(outcome.new_high_score);
        assert_eq!(session.high_score(), 40);
        session.set_high_score(10);
        assert_eq!(
            session.high_score(),
            40,
            "stored record never lowers the high score"
        );
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut session = GameSession::new(config());
        session.set_theme(Theme::by_id("forest"));
        session.start_game();
        let shape = session.tray().get(1).unwrap().clone();
        let (row, col) = placement::legal_anchors(session.grid(), shape.layout())
            .next()
            .unwrap();
        let (row, col) = (isize::try_from(row).unwrap(), isize::try_from(col).unwrap());
        session.place_shape(1, row, col, Instant::now()).unwrap();
        session.toggle_pause();

        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let snapshot: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.status, GameStatus::Paused);
        assert_eq!(snapshot.theme, "forest");

        let mut resumed = GameSession::new(config());
        resumed.restore(snapshot).unwrap();
        assert_eq!(resumed.snapshot(), session.snapshot());
        assert_eq!(resumed.theme().id(), "forest");
    }

    #[test]
    fn test_restore_keeps_best_combo_and_streak() {
        let mut rows = EMPTY;
        rows[0] = "#######.";
        rows[1] = "#######.";
        let mut session = playing(
            grid_from(&rows),
            tray([Some("1/1"), Some("1"), Some("1")]),
            config(),
        );
        let t0 = Instant::now();
        session.place_shape(0, 0, 7, t0).unwrap();
        session
            .place_shape(1, 5, 5, t0 + Duration::from_secs(1))
            .unwrap();
        assert!(session.tick(t0 + Duration::from_secs(6)));

        let snapshot = session.snapshot();
        assert_eq!((snapshot.combo, snapshot.streak), (0, 0));
        assert_eq!((snapshot.best_combo, snapshot.best_streak), (2, 1));

        let mut resumed = GameSession::new(config());
        resumed.restore(snapshot).unwrap();
        assert_eq!(resumed.summary().best_combo, 2);
        assert_eq!(resumed.summary().best_streak, 1);
        assert_eq!(resumed.snapshot(), session.snapshot());
    }

    #[test]
    fn test_snapshot_without_best_values_loads() {
        let session = playing(grid_from(&EMPTY), tray([Some("1"), None, None]), config());
        let mut value = serde_json::to_value(session.snapshot()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("bestCombo");
        object.remove("bestStreak");
        object["combo"] = 3.into();

        let snapshot: SessionSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(snapshot.best_combo, 0);
        let mut resumed = GameSession::new(config());
        resumed.restore(snapshot).unwrap();
        assert_eq!(resumed.summary().best_combo, 3);
    }

    #[test]
    fn test_snapshot_field_names() {
        let session = playing(grid_from(&EMPTY), tray([Some("1"), None, None]), config());
        let value = serde_json::to_value(session.snapshot()).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "grid",
            "score",
            "tray",
            "combo",
            "streak",
            "bestCombo",
            "bestStreak",
            "blocksPlacedThisGame",
            "linesClearedThisGame",
            "theme",
            "status",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object["status"], "PLAYING");
        assert_eq!(
            serde_json::to_value(GameStatus::GameOver).unwrap(),
            "GAMEOVER"
        );
    }

    #[test]
    fn test_restore_rejects_unresumable() {
        let mut session = GameSession::new(config());
        let mut session = playing(grid_from(&EMPTY), tray([Some("1"), None, None]), config());
        let mut snapshot = session.snapshot();
        snapshot.status = GameStatus::GameOver;
        assert_eq!(
            session.restore(snapshot.clone()),
            Err(RestoreError::NotResumable {
                status: GameStatus::GameOver
            })
        );
        snapshot.status = GameStatus::Playing;
        snapshot.grid = Grid::new(6);
        assert_eq!(
            session.restore(snapshot),
            Err(RestoreError::GridSizeMismatch {
                expected: 8,
                found: 6
            })
        );
        assert!(session.status().is_start());
    }

    #[test]
    fn test_placement_adds_exactly_shape_cells() {
        let mut session = GameSession::new(config());
        let mut now = Instant::now();
        session.start_game();
        for _ in 0..300 {
            if !session.status().is_playing() {
                session.start_game();
            }
            let (slot, shape, (row, col)) = session
                .tray()
                .slots()
                .iter()
                .enumerate()
                .filter_map(|(i, s)| s.clone().map(|s| (i, s)))
                .find_map(|(i, s)| {
                    let anchor = placement::legal_anchors(session.grid(), s.layout()).next();
                    anchor.map(|anchor| (i, s, anchor))
                })
                .expect("a playing session always has a placeable shape");
            let stamped = session.grid().occupied_count() + shape.cell_count();
            let row = isize::try_from(row).unwrap();
            let col = isize::try_from(col).unwrap();
            let outcome = session.place_shape(slot, row, col, now).unwrap();
            assert_eq!(outcome.cells_placed, shape.cell_count());
            if outcome.cleared.is_empty() {
                assert_eq!(session.grid().occupied_count(), stamped);
            } else {
                assert!(session.grid().occupied_count() < stamped);
            }
            assert!(ClearedLines::find(session.grid()).is_empty());
            now += Duration::from_millis(700);
        }
    }
}
