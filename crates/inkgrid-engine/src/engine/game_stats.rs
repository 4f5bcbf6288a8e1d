/// Points per cell placed.
pub const POINTS_PER_CELL: usize = 10;

/// Per-game statistics: score and placement counters.
///
/// - **Score**: `10` points per placed cell plus line clear points
/// - **Blocks placed**: total cells stamped onto the grid
/// - **Lines cleared**: total rows and columns cleared
/// - **Line clear distribution**: placements by number of lines they cleared
///
/// # Example
///
/// ```
/// use inkgrid_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_placement(3);
/// stats.record_clear(2, 800);
///
/// assert_eq!(stats.score(), 830);
/// assert_eq!(stats.blocks_placed(), 3);
/// assert_eq!(stats.lines_cleared(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    placements: usize,
    blocks_placed: usize,
    lines_cleared: usize,
    line_clear_counter: [usize; Self::COUNTER_LEN],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Buckets in [`Self::line_clear_counter`]; the last one collects
    /// everything from that many lines up.
    pub const COUNTER_LEN: usize = 5;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            placements: 0,
            blocks_placed: 0,
            lines_cleared: 0,
            line_clear_counter: [0; Self::COUNTER_LEN],
        }
    }

    /// Statistics resumed from a saved game.
    ///
    /// Placement count and the line clear distribution are not saved and
    /// start from zero.
    #[must_use]
    pub const fn resumed(score: usize, blocks_placed: usize, lines_cleared: usize) -> Self {
        Self {
            score,
            blocks_placed,
            lines_cleared,
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of shapes placed.
    #[must_use]
    pub const fn placements(&self) -> usize {
        self.placements
    }

    /// Number of cells placed.
    #[must_use]
    pub const fn blocks_placed(&self) -> usize {
        self.blocks_placed
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Placements by lines cleared: `[0]` placements that cleared nothing,
    /// `[1]` single clears, and so on. The last bucket is open-ended.
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[usize; Self::COUNTER_LEN] {
        &self.line_clear_counter
    }

    /// Records a placed shape of `cells` cells and returns the points it earned.
    pub const fn record_placement(&mut self, cells: usize) -> usize {
        let points = cells * POINTS_PER_CELL;
        self.placements += 1;
        self.blocks_placed += cells;
        self.score += points;
        points
    }

    /// Records the clear that followed the latest placement.
    ///
    /// Call once per placement, with `lines == 0` when nothing cleared.
    pub const fn record_clear(&mut self, lines: usize, points: usize) {
        let bucket = if lines < Self::COUNTER_LEN {
            lines
        } else {
            Self::COUNTER_LEN - 1
        };
        self.line_clear_counter[bucket] += 1;
        self.lines_cleared += lines;
        self.score += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = GameStats::new();
        assert_eq!(stats.record_placement(4), 40);
        stats.record_clear(0, 0);
        assert_eq!(stats.record_placement(1), 10);
        stats.record_clear(1, 100);
        assert_eq!(stats.record_placement(9), 90);
        stats.record_clear(6, 4200);

        assert_eq!(stats.score(), 40 + 10 + 100 + 90 + 4200);
        assert_eq!(stats.placements(), 3);
        assert_eq!(stats.blocks_placed(), 14);
        assert_eq!(stats.lines_cleared(), 7);
        assert_eq!(stats.line_clear_counter(), &[1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_resumed() {
        let stats = GameStats::resumed(1234, 56, 7);
        assert_eq!(stats.score(), 1234);
        assert_eq!(stats.blocks_placed(), 56);
        assert_eq!(stats.lines_cleared(), 7);
        assert_eq!(stats.placements(), 0);
    }
}
