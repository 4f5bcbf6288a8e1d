use arrayvec::ArrayVec;

use crate::core::Grid;

/// Points per cleared line, before multi-line bonuses.
pub const POINTS_PER_LINE: usize = 100;

/// Extra points per line when more than one line clears at once.
pub const MULTI_LINE_BONUS: usize = 200;

/// Extra points per line for the combo itself when more than one line clears at once.
pub const COMBO_BONUS: usize = 100;

/// Full rows and columns found on a grid.
///
/// Rows and columns are collected independently, so a cell at the crossing
/// of a full row and a full column belongs to both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedLines {
    rows: ArrayVec<usize, { Grid::MAX_SIZE }>,
    cols: ArrayVec<usize, { Grid::MAX_SIZE }>,
}

impl ClearedLines {
    /// Scans the grid for full rows and full columns.
    #[must_use]
    pub fn find(grid: &Grid) -> Self {
        Self::from_indices(
            (0..grid.size()).filter(|&row| grid.is_row_full(row)),
            (0..grid.size()).filter(|&col| grid.is_col_full(col)),
        )
    }

    pub(crate) fn from_indices(
        rows: impl IntoIterator<Item = usize>,
        cols: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            cols: cols.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Total number of lines (rows plus columns).
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns whether the cell lies on one of the lines.
    #[must_use]
    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        self.rows.contains(&row) || self.cols.contains(&col)
    }

    /// Empties every cell on every line in one batch.
    ///
    /// Returns the number of cells that were emptied.
    pub fn apply(&self, grid: &mut Grid) -> usize {
        let size = grid.size();
        let mut cleared = 0;
        for row in 0..size {
            for col in 0..size {
                if self.contains_cell(row, col) && grid.is_occupied(row, col) == Ok(true) {
                    // In range by construction.
                    let _ = grid.set(row, col, None);
                    cleared += 1;
                }
            }
        }
        cleared
    }
}

/// Points awarded for clearing `lines` lines with one placement.
///
/// | lines | points |
/// |-------|--------|
/// | 1     | 100    |
/// | 2     | 800    |
/// | 3     | 1200   |
#[must_use]
pub const fn clear_points(lines: usize) -> usize {
    let base = lines * POINTS_PER_LINE;
    if lines > 1 {
        base + lines * MULTI_LINE_BONUS + lines * COMBO_BONUS
    } else {
        base
    }
}

/// Feedback shown after a clearing placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::IsVariant)]
pub enum FeedbackTier {
    InkPurge,
    Masterful,
    Sublime,
}

impl FeedbackTier {
    #[must_use]
    pub const fn from_lines(lines: usize) -> Option<Self> {
        match lines {
            0 => None,
            1 => Some(Self::InkPurge),
            2 => Some(Self::Masterful),
            _ => Some(Self::Sublime),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InkPurge => "Ink Purge!",
            Self::Masterful => "Masterful!",
            Self::Sublime => "Sublime!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ink, Rgb};

    const INK: Ink = Ink::new(Rgb::from_hex(0x1a_365d), '○');

    fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..grid.size() {
            grid.set(row, col, Some(INK)).unwrap();
        }
    }

    fn fill_col(grid: &mut Grid, col: usize) {
        for row in 0..grid.size() {
            grid.set(row, col, Some(INK)).unwrap();
        }
    }

    #[test]
    fn test_no_full_lines_is_noop() {
        let mut grid = Grid::new(8);
        for i in 0..8 {
            grid.set(i, i, Some(INK)).unwrap();
        }
        grid.set(0, 7, None).unwrap();
        let before = grid.clone();
        let lines = ClearedLines::find(&grid);
        assert!(lines.is_empty());
        assert_eq!(lines.apply(&mut grid), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_rows_and_cols_clear_as_one_batch() {
        let mut grid = Grid::new(8);
        fill_row(&mut grid, 2);
        fill_row(&mut grid, 5);
        fill_col(&mut grid, 0);
        grid.set(7, 7, Some(INK)).unwrap();

        let lines = ClearedLines::find(&grid);
        assert_eq!(lines.rows(), [2, 5]);
        assert_eq!(lines.cols(), [0]);
        assert_eq!(lines.count(), 3);

        // 8 + 8 + 8 cells, minus the two crossings counted twice.
        assert_eq!(lines.apply(&mut grid), 22);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.get(7, 7), Ok(Some(INK)));
    }

    #[test]
    fn test_clear_points() {
        assert_eq!(clear_points(0), 0);
        assert_eq!(clear_points(1), 100);
        assert_eq!(clear_points(2), 800);
        assert_eq!(clear_points(3), 1200);
        assert_eq!(clear_points(4), 1600);
    }

    #[test]
    fn test_feedback_tier() {
        assert_eq!(FeedbackTier::from_lines(0), None);
        for (lines, label) in [(1, "Ink Purge!"), (2, "Masterful!"), (3, "Sublime!")] {
            let tier = FeedbackTier::from_lines(lines).unwrap();
            assert_eq!(tier.label(), label);
        }
        assert_eq!(FeedbackTier::from_lines(6), Some(FeedbackTier::Sublime));
    }
}
