//! Phase solvers for the top two rows and the final 2x2 block.
//!
//! Two rows leave no room to rotate a tile in place, so row-0 targets are
//! ferried along row 1 and re-seated by a fixed closing cycle. Columns are
//! consumed right to left, row 1 before row 0, until only the top-left
//! block remains.

use crate::grid::Grid;
use crate::invariant::{row0_invariant, row1_invariant};
use crate::moves::Move;
use crate::solver::{
    apply_all, find_tile, push_repeat, Phase, SolveError, BLOCK_SPIN, PUSH_RIGHT_OVER, ROW0_TUCK,
};

/// Spin cap for the final block. Each spin 3-cycles the three non-blank
/// tiles, so tile 1 comes around to (0, 1) within two spins whenever the
/// configuration is reachable.
const MAX_BLOCK_SPINS: usize = 3;

/// Place the tile for (0, `target_col`) with `target_col` >= 2, leaving the
/// blank at (1, `target_col` - 1).
pub(crate) fn place_row0(grid: &mut Grid, target_col: usize) -> Result<Vec<Move>, SolveError> {
    if target_col < 2 || !row0_invariant(grid, target_col) {
        return Err(SolveError::PreconditionViolated {
            phase: Phase::Row0,
            row: 0,
            col: target_col,
        });
    }

    let current = find_tile(grid, target_col)?;
    let move_row = -(current.row as isize);
    let move_col = current.col as isize - target_col as isize;

    let mut seq: Vec<Move> = Vec::new();
    if move_row == 0 && move_col == -1 {
        // One to the left on the same row: seat it and drop into place.
        seq.extend_from_slice(&[Move::Left, Move::Down]);
    } else if move_row == -1 && move_col == -1 {
        seq.extend_from_slice(&[Move::Left, Move::Left, Move::Down]);
        seq.extend_from_slice(&ROW0_TUCK);
    } else if (-1..=0).contains(&move_row) && move_col <= -2 {
        // General case: ferry the tile along row 1 to (1, target_col - 1)
        // with the blank on its left, then run the fixed closer.
        seq.extend_from_slice(&[Move::Left, Move::Down]);
        let span = (-(move_col + 1)) as usize;
        if move_row == 0 {
            // Tile still in row 0: dip under it and lift it down to row 1.
            push_repeat(&mut seq, Move::Left, span);
            seq.push(Move::Up);
            push_repeat(&mut seq, Move::Right, span);
            seq.push(Move::Down);
        }
        push_repeat(&mut seq, Move::Left, span);
        for _ in 0..(-move_col - 2) {
            seq.extend_from_slice(&PUSH_RIGHT_OVER);
        }
        seq.extend_from_slice(&ROW0_TUCK);
    } else {
        return Err(SolveError::BadOffset {
            phase: Phase::Row0,
            move_row,
            move_col,
        });
    }

    apply_all(grid, &seq)?;
    Ok(seq)
}

/// Place the tile for (1, `target_col`) with `target_col` >= 2, leaving the
/// blank at (0, `target_col`).
pub(crate) fn place_row1(grid: &mut Grid, target_col: usize) -> Result<Vec<Move>, SolveError> {
    if target_col < 2 || !row1_invariant(grid, target_col) {
        return Err(SolveError::PreconditionViolated {
            phase: Phase::Row1,
            row: 1,
            col: target_col,
        });
    }

    let value = grid.width() + target_col;
    let current = find_tile(grid, value)?;
    let move_row = 1 - current.row as isize;
    let move_col = current.col as isize - target_col as isize;

    let mut seq: Vec<Move> = Vec::new();
    if move_row == 1 && move_col == 0 {
        // Directly above the blank.
        seq.push(Move::Up);
    } else if (0..=1).contains(&move_row) && move_col <= -1 {
        let span = (-move_col) as usize;
        if move_row == 1 {
            // Tile in row 0: dip under it and lift it down to row 1.
            push_repeat(&mut seq, Move::Left, span);
            seq.push(Move::Up);
            push_repeat(&mut seq, Move::Right, span);
            seq.push(Move::Down);
        }
        push_repeat(&mut seq, Move::Left, span);
        for _ in 0..(-move_col - 1) {
            seq.extend_from_slice(&PUSH_RIGHT_OVER);
        }
        seq.extend_from_slice(&[Move::Up, Move::Right]);
    } else {
        return Err(SolveError::BadOffset {
            phase: Phase::Row1,
            move_row,
            move_col,
        });
    }

    apply_all(grid, &seq)?;
    Ok(seq)
}

/// Rotate the top-left 2x2 block until tile 1 reaches (0, 1).
///
/// The opening lifts the blank to (0, 0); each spin then 3-cycles the
/// other three block tiles. On an unreachable configuration the loop still
/// exits with tile 1 seated but its two neighbors swapped, which the
/// caller's terminal check reports.
pub(crate) fn place_final_block(grid: &mut Grid) -> Result<Vec<Move>, SolveError> {
    if !row1_invariant(grid, 1) {
        return Err(SolveError::PreconditionViolated {
            phase: Phase::FinalBlock,
            row: 1,
            col: 1,
        });
    }

    let opening = [Move::Up, Move::Left];
    apply_all(grid, &opening)?;
    let mut seq = opening.to_vec();
    for _ in 0..MAX_BLOCK_SPINS {
        if grid.tile(0, 1) == 1 {
            break;
        }
        apply_all(grid, &BLOCK_SPIN)?;
        seq.extend_from_slice(&BLOCK_SPIN);
    }
    Ok(seq)
}
