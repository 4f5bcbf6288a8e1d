use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ink::Ink;

/// Longest side a layout may have.
pub const MAX_SPAN: usize = 5;

/// Rectangular boolean matrix describing which cells of a shape are filled.
///
/// Layouts are written as rows of `0`/`1` separated by `/`, top row first.
/// For example `"10/11"` is the three-cell L:
///
/// ```text
/// #.
/// ##
/// ```
///
/// A layout has at least one filled cell and at most [`MAX_SPAN`] rows and
/// columns. Its serialized form is the same pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeLayout {
    rows: u8,
    cols: u8,
    // Row-major with a fixed stride of MAX_SPAN.
    bits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseLayoutError {
    #[display("layout pattern is empty")]
    Empty,
    #[display("layout pattern may only contain '0', '1' and '/'")]
    InvalidChar,
    #[display("layout rows must all have the same non-zero length")]
    Ragged,
    #[display("layout exceeds 5x5")]
    TooLarge,
    #[display("layout has no filled cell")]
    NoFilledCell,
}

impl ShapeLayout {
    /// Parses a pattern such as `"111/010"`.
    #[expect(clippy::cast_possible_truncation)]
    pub const fn parse(pattern: &str) -> Result<Self, ParseLayoutError> {
        let bytes = pattern.as_bytes();
        if bytes.is_empty() {
            return Err(ParseLayoutError::Empty);
        }
        let mut rows = 0;
        let mut cols = 0;
        let mut col = 0;
        let mut bits = 0u32;
        let mut i = 0;
        while i <= bytes.len() {
            let byte = if i < bytes.len() { bytes[i] } else { b'/' };
            match byte {
                b'0' | b'1' => {
                    if rows >= MAX_SPAN || col >= MAX_SPAN {
                        return Err(ParseLayoutError::TooLarge);
                    }
                    if byte == b'1' {
                        bits |= 1 << (rows * MAX_SPAN + col);
                    }
                    col += 1;
                }
                b'/' => {
                    if col == 0 || (rows > 0 && col != cols) {
                        return Err(ParseLayoutError::Ragged);
                    }
                    cols = col;
                    rows += 1;
                    col = 0;
                }
                _ => return Err(ParseLayoutError::InvalidChar),
            }
            i += 1;
        }
        if bits == 0 {
            return Err(ParseLayoutError::NoFilledCell);
        }
        Ok(Self {
            rows: rows as u8,
            cols: cols as u8,
            bits,
        })
    }

    /// Like [`Self::parse`], for patterns known to be valid at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid.
    #[must_use]
    pub const fn from_pattern(pattern: &str) -> Self {
        match Self::parse(pattern) {
            Ok(layout) => layout,
            Err(_) => panic!("invalid shape layout pattern"),
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Returns whether `(row, col)` of the layout is filled. Out-of-range
    /// positions are unfilled.
    #[must_use]
    pub const fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits & (1 << (row * MAX_SPAN + col)) != 0
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates over filled cells as `(row, col)` offsets from the top-left.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.cols()).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_filled(row, col))
    }
}

impl fmt::Display for ShapeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                f.write_str("/")?;
            }
            for col in 0..self.cols() {
                f.write_str(if self.is_filled(row, col) { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

impl FromStr for ShapeLayout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ShapeLayout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShapeLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid layout {s:?}: {e}")))
    }
}

/// The fixed library of layouts shapes are drawn from.
///
/// Rotations and reflections are listed as separate layouts; no layout
/// appears twice.
pub const CATALOG: [ShapeLayout; 32] = {
    const fn l(pattern: &str) -> ShapeLayout {
        ShapeLayout::from_pattern(pattern)
    }
    [
        // single
        l("1"),
        // lines
        l("11"),
        l("111"),
        l("1111"),
        l("11111"),
        l("1/1"),
        l("1/1/1"),
        l("1/1/1/1"),
        l("1/1/1/1/1"),
        // squares
        l("11/11"),
        l("111/111/111"),
        // L
        l("10/11"),
        l("01/11"),
        l("11/10"),
        l("11/01"),
        l("111/100"),
        l("111/001"),
        l("10/10/11"),
        l("01/01/11"),
        // T
        l("111/010"),
        l("010/111"),
        l("10/11/10"),
        l("01/11/01"),
        // S / Z
        l("110/011"),
        l("011/110"),
        l("10/11/01"),
        l("01/11/10"),
        // plus
        l("010/111/010"),
        // J
        l("11/01/01"),
        l("11/10/10"),
        // rectangles
        l("111/111"),
        l("11/11/11"),
    ]
};

/// Identifier of a drawn shape, unique within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[display("{_0:016x}")]
#[serde(transparent)]
pub struct ShapeId(pub u64);

/// A shape sitting in the tray: a layout plus the ink it stamps.
///
/// Shapes are immutable once drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    layout: ShapeLayout,
    ink: Ink,
}

impl Shape {
    #[must_use]
    pub const fn new(id: ShapeId, layout: ShapeLayout, ink: Ink) -> Self {
        Self { id, layout, ink }
    }

    #[must_use]
    pub const fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub const fn layout(&self) -> &ShapeLayout {
        &self.layout
    }

    #[must_use]
    pub const fn ink(&self) -> Ink {
        self.ink
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.layout.rows()
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.layout.cols()
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.layout.cell_count()
    }
}
