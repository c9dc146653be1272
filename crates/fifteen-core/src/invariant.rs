//! Positional invariants used as phase boundaries.
//!
//! Each predicate answers whether a region of the grid is already in its
//! final arrangement with the blank parked where the matching phase expects
//! it. They are pure scans; the phase solvers check them on entry and the
//! tests check them as postconditions.

use crate::grid::{Grid, Position};

/// Lower-row invariant at `(target_row, target_col)`: the blank sits exactly
/// there, and every cell whose canonical value exceeds
/// `target_col + width * target_row` already holds its canonical value.
pub fn lower_row_invariant(grid: &Grid, target_row: usize, target_col: usize) -> bool {
    if grid.blank() != Position::new(target_row, target_col) {
        return false;
    }
    let width = grid.width();
    let target_value = target_col + width * target_row;
    for value in target_value + 1..grid.height() * width {
        if grid.tile(value / width, value % width) != value {
            return false;
        }
    }
    true
}

/// Row-0 invariant at `target_col`: rows 2 and below solved, row 0 solved
/// right of `target_col`, row 1 solved from `target_col` rightward, blank at
/// `(0, target_col)`.
pub fn row0_invariant(grid: &Grid, target_col: usize) -> bool {
    if grid.blank() != Position::new(0, target_col) {
        return false;
    }
    if !lower_rows_solved(grid) {
        return false;
    }
    let width = grid.width();
    for col in 0..width {
        if col > target_col && grid.tile(0, col) != col {
            return false;
        }
        if col >= target_col && grid.tile(1, col) != width + col {
            return false;
        }
    }
    true
}

/// Row-1 invariant at `target_col`: rows 2 and below solved, both top rows
/// solved right of `target_col`, blank at `(1, target_col)`.
pub fn row1_invariant(grid: &Grid, target_col: usize) -> bool {
    if grid.blank() != Position::new(1, target_col) {
        return false;
    }
    if !lower_rows_solved(grid) {
        return false;
    }
    let width = grid.width();
    for col in 0..width {
        if col > target_col && grid.tile(0, col) != col {
            return false;
        }
        if col > target_col && grid.tile(1, col) != width + col {
            return false;
        }
    }
    true
}

/// Every cell with canonical value >= 2 * width (rows 2 and below) holds
/// its canonical value.
fn lower_rows_solved(grid: &Grid) -> bool {
    let width = grid.width();
    for value in 2 * width..grid.height() * width {
        if grid.tile(value / width, value % width) != value {
            return false;
        }
    }
    true
}
