use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::OutOfBoundsError;

use super::ink::Ink;

/// Side length of the grid used for play.
pub const GRID_SIZE: usize = 8;

/// Square cell store that shapes are stamped onto.
///
/// Each cell is either empty (`None`) or fully occupied by an [`Ink`].
/// The side length is fixed when the grid is created and never changes.
///
/// Cells are addressed by `(row, col)`, both in `0..size`. Addressing
/// outside that range through [`Grid::get`] or [`Grid::set`] is reported as an
/// [`OutOfBoundsError`]; placement code checks bounds before touching cells.
///
/// # Serialization
///
/// A grid serializes as an array of rows, each an array of `Ink | null`.
/// Deserialization rejects ragged or non-square input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Ink>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl Grid {
    /// Largest supported side length.
    pub const MAX_SIZE: usize = 16;

    /// Creates an all-empty `size`x`size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`Self::MAX_SIZE`].
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(
            (1..=Self::MAX_SIZE).contains(&size),
            "grid size must be in 1..={}, got {size}",
            Self::MAX_SIZE
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, OutOfBoundsError> {
        if row >= self.size || col >= self.size {
            return Err(OutOfBoundsError {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Option<Ink>, OutOfBoundsError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i])
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, OutOfBoundsError> {
        Ok(self.get(row, col)?.is_some())
    }

    pub fn set(
        &mut self,
        row: usize,
        col: usize,
        cell: Option<Ink>,
    ) -> Result<(), OutOfBoundsError> {
        let i = self.index(row, col)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Returns the cells of one row. Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Option<Ink>] {
        &self.cells[row * self.size..][..self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Ink>]> + '_ {
        self.cells.chunks(self.size)
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.size && self.row(row).iter().all(Option::is_some)
    }

    #[must_use]
    pub fn is_col_full(&self, col: usize) -> bool {
        col < self.size && (0..self.size).all(|row| self.cells[row * self.size + col].is_some())
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<Option<Ink>>>::deserialize(deserializer)?;
        let size = rows.len();
        if !(1..=Self::MAX_SIZE).contains(&size) {
            return Err(serde::de::Error::custom(format!(
                "grid must have 1..={} rows, got {size}",
                Self::MAX_SIZE
            )));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(serde::de::Error::custom(format!(
                    "grid must be square: row {i} has {} cells, expected {size}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }
}
