//! Placement legality checks.
//!
//! Anchors are signed so that positions hovering partly off the grid can be
//! tested directly; they are simply illegal.

use crate::{
    PlacementError,
    core::{Grid, Shape, ShapeLayout},
};

use super::{line_clear::ClearedLines, tray::Tray};

/// How far outside the grid (in cells) a drop may land before it is
/// treated as abandoned rather than attempted.
pub const DROP_TOLERANCE: isize = 2;

fn checked_anchor(
    grid: &Grid,
    layout: ShapeLayout,
    row: isize,
    col: isize,
) -> Option<(usize, usize)> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    let fits_rows = row + layout.rows() <= grid.size();
    let fits_cols = col + layout.cols() <= grid.size();
    (fits_rows && fits_cols).then_some((row, col))
}

fn fits(grid: &Grid, layout: ShapeLayout, row: usize, col: usize) -> bool {
    layout
        .filled_cells()
        .all(|(r, c)| grid.is_occupied(row + r, col + c) == Ok(false))
}

/// Returns whether `layout` anchored with its top-left cell at `(row, col)`
/// lies inside the grid without overlapping any occupied cell.
///
/// Bounds are checked before any cell is inspected.
#[must_use]
pub fn can_place_at(grid: &Grid, layout: &ShapeLayout, row: isize, col: isize) -> bool {
    let Some((row, col)) = checked_anchor(grid, *layout, row, col) else {
        return false;
    };
    fits(grid, *layout, row, col)
}

/// Iterates over every legal anchor for `layout`, row by row.
pub fn legal_anchors<'a>(
    grid: &'a Grid,
    layout: &'a ShapeLayout,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let row_count = (grid.size() + 1).saturating_sub(layout.rows());
    let col_count = (grid.size() + 1).saturating_sub(layout.cols());
    (0..row_count)
        .flat_map(move |row| (0..col_count).map(move |col| (row, col)))
        .filter(|&(row, col)| fits(grid, *layout, row, col))
}

/// Returns whether `layout` fits somewhere on the grid.
///
/// Stops at the first legal anchor.
#[must_use]
pub fn can_place_anywhere(grid: &Grid, layout: &ShapeLayout) -> bool {
    legal_anchors(grid, layout).next().is_some()
}

/// Returns whether the game can continue with this tray.
///
/// An empty tray never ends the game: it is about to be refilled.
#[must_use]
pub fn can_place_any(grid: &Grid, tray: &Tray) -> bool {
    tray.is_empty()
        || tray
            .shapes()
            .any(|shape| can_place_anywhere(grid, shape.layout()))
}

/// Lines that would be completed if `layout` were placed at `(row, col)`.
///
/// Returns no lines when the placement is illegal. Used for hover previews.
#[must_use]
pub fn potential_lines(
    grid: &Grid,
    layout: &ShapeLayout,
    row: isize,
    col: isize,
) -> ClearedLines {
    let Some((row, col)) = checked_anchor(grid, *layout, row, col) else {
        return ClearedLines::default();
    };
    if !fits(grid, *layout, row, col) {
        return ClearedLines::default();
    }
    let covered = |r: usize, c: usize| {
        (r >= row && c >= col && layout.is_filled(r - row, c - col))
            || grid.is_occupied(r, c) == Ok(true)
    };
    let size = grid.size();
    ClearedLines::from_indices(
        (0..size).filter(|&r| (0..size).all(|c| covered(r, c))),
        (0..size).filter(|&c| (0..size).all(|r| covered(r, c))),
    )
}

/// Returns whether a drop at `(row, col)` is so far off the grid that it
/// should be treated as an abandoned drag.
#[must_use]
pub fn is_way_outside(grid: &Grid, row: isize, col: isize) -> bool {
    let size = isize::try_from(grid.size()).unwrap_or(isize::MAX);
    row < -DROP_TOLERANCE
        || col < -DROP_TOLERANCE
        || row > size + DROP_TOLERANCE
        || col > size + DROP_TOLERANCE
}

/// Stamps `shape` onto the grid at `(row, col)` if the placement is legal.
///
/// Returns the number of cells stamped. On error the grid is untouched.
pub fn stamp(
    grid: &mut Grid,
    shape: &Shape,
    row: isize,
    col: isize,
) -> Result<usize, PlacementError> {
    let invalid = PlacementError::InvalidPlacement { row, col };
    let Some((row, col)) = checked_anchor(grid, *shape.layout(), row, col) else {
        return Err(invalid);
    };
    if !fits(grid, *shape.layout(), row, col) {
        return Err(invalid);
    }
    for (r, c) in shape.layout().filled_cells() {
        grid.set(row + r, col + c, Some(shape.ink()))
            .map_err(|_| invalid)?;
    }
    Ok(shape.cell_count())
}
