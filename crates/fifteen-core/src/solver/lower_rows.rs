//! Phase solvers for rows 2 and below.
//!
//! `place_interior` handles every target outside column 0; `place_col0`
//! handles column 0, which has no room to maneuver on its left. Both
//! require `lower_row_invariant` at the target on entry and re-establish
//! it at the previous row-major cell on exit.

use crate::grid::{Grid, Position};
use crate::invariant::lower_row_invariant;
use crate::moves::Move;
use crate::solver::{
    apply_all, find_tile, push_repeat, Phase, SolveError, COL0_TUCK, PULL_DOWN_LEFT,
    PULL_DOWN_RIGHT, PUSH_LEFT_OVER, PUSH_LEFT_UNDER, PUSH_RIGHT_OVER, PUSH_RIGHT_UNDER,
};

/// Place the tile for `target` (row >= 2, col != 0), leaving the blank one
/// column to the left with the invariant restored there.
pub(crate) fn place_interior(grid: &mut Grid, target: Position) -> Result<Vec<Move>, SolveError> {
    if target.row < 2 || target.col == 0 || !lower_row_invariant(grid, target.row, target.col) {
        return Err(SolveError::PreconditionViolated {
            phase: Phase::Interior,
            row: target.row,
            col: target.col,
        });
    }

    let value = target.row * grid.width() + target.col;
    let current = find_tile(grid, value)?;
    let move_row = target.row as isize - current.row as isize;
    let move_col = current.col as isize - target.col as isize;

    let mut seq: Vec<Move> = Vec::new();
    if move_row > 0 && move_col == 0 {
        // Tile straight above: climb to it, then pull it down along the
        // target column.
        push_repeat(&mut seq, Move::Up, move_row as usize);
        for _ in 1..move_row {
            seq.extend_from_slice(&PULL_DOWN_LEFT);
        }
        seq.extend_from_slice(&[Move::Left, Move::Down]);
    } else if move_row == 0 && move_col < 0 {
        // Tile on the target row to the left: the walk-in itself shifts it
        // one column right, cycles cover the rest.
        push_repeat(&mut seq, Move::Left, (-move_col) as usize);
        for _ in 0..(-move_col - 1) {
            seq.extend_from_slice(&PUSH_RIGHT_OVER);
        }
    } else if move_row > 0 && move_col < 0 {
        // Up and to the left: bring the tile to the target column first
        // (cycling under it keeps the blank clear of the target row), then
        // pull it down.
        push_repeat(&mut seq, Move::Up, move_row as usize);
        push_repeat(&mut seq, Move::Left, (-move_col) as usize);
        for _ in 0..(-move_col - 1) {
            seq.extend_from_slice(&PUSH_RIGHT_UNDER);
        }
        seq.extend_from_slice(&[Move::Down, Move::Right, Move::Up]);
        for _ in 1..move_row {
            seq.extend_from_slice(&PULL_DOWN_LEFT);
        }
        seq.extend_from_slice(&[Move::Left, Move::Down]);
    } else if move_row > 0 && move_col > 0 {
        // Up and to the right. With only one row above the target the
        // leftward cycles must loop over the tile, not under it.
        push_repeat(&mut seq, Move::Up, move_row as usize);
        push_repeat(&mut seq, Move::Right, move_col as usize);
        let shift = if move_row == 1 { PUSH_LEFT_OVER } else { PUSH_LEFT_UNDER };
        for _ in 1..move_col {
            seq.extend_from_slice(&shift);
        }
        let descents = if move_row == 1 {
            seq.extend_from_slice(&[Move::Up, Move::Left]);
            1
        } else {
            seq.extend_from_slice(&[Move::Down, Move::Left, Move::Up]);
            move_row - 1
        };
        for _ in 0..descents {
            seq.extend_from_slice(&PULL_DOWN_LEFT);
        }
        seq.extend_from_slice(&[Move::Left, Move::Down]);
    } else {
        return Err(SolveError::BadOffset {
            phase: Phase::Interior,
            move_row,
            move_col,
        });
    }

    apply_all(grid, &seq)?;
    Ok(seq)
}

/// Place the tile for (`target_row`, 0), then walk the blank right to the
/// end of the row above, where the invariant resumes.
pub(crate) fn place_col0(grid: &mut Grid, target_row: usize) -> Result<Vec<Move>, SolveError> {
    if target_row < 2 || !lower_row_invariant(grid, target_row, 0) {
        return Err(SolveError::PreconditionViolated {
            phase: Phase::Column0,
            row: target_row,
            col: 0,
        });
    }

    let width = grid.width();
    let value = target_row * width;
    let current = find_tile(grid, value)?;
    // The invariant keeps the tile strictly above the target row.
    let move_row = target_row - current.row;
    let move_col = current.col;

    let mut seq: Vec<Move> = Vec::new();
    if move_row == 1 && move_col == 0 {
        // Directly above: one swap seats it.
        seq.extend_from_slice(&[Move::Up, Move::Right]);
    } else {
        if move_row > 1 && move_col == 0 {
            push_repeat(&mut seq, Move::Up, move_row);
            for _ in 2..move_row {
                seq.extend_from_slice(&PULL_DOWN_RIGHT);
            }
            seq.extend_from_slice(&[Move::Right, Move::Down, Move::Left]);
        } else {
            push_repeat(&mut seq, Move::Up, move_row);
            push_repeat(&mut seq, Move::Right, move_col);
            let shift = if move_row == 1 { PUSH_LEFT_OVER } else { PUSH_LEFT_UNDER };
            for _ in 1..move_col {
                seq.extend_from_slice(&shift);
            }
            if move_row == 1 {
                seq.push(Move::Left);
            } else {
                seq.extend_from_slice(&[Move::Down, Move::Left, Move::Up]);
                for _ in 2..move_row {
                    seq.extend_from_slice(&PULL_DOWN_RIGHT);
                }
                seq.extend_from_slice(&[Move::Right, Move::Down, Move::Left]);
            }
        }
        // The walks above leave the tile at (target_row - 1, 1) with the
        // blank on its left; this fixed cycle rotates it down into the
        // corner without touching the solved rows below.
        seq.extend_from_slice(&COL0_TUCK);
    }
    push_repeat(&mut seq, Move::Right, width - 2);

    apply_all(grid, &seq)?;
    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::encode;

    fn board(rows: &[&[usize]]) -> Grid {
        let rows: Vec<Vec<usize>> = rows.iter().map(|row| row.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_interior_tile_straight_above() {
        let mut grid = board(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 15],
            &[8, 9, 10, 11],
            &[12, 13, 14, 0],
        ]);
        let seq = place_interior(&mut grid, Position::new(3, 3)).unwrap();
        assert_eq!(encode(&seq), "uulddruld");
        assert!(lower_row_invariant(&grid, 3, 2));
        assert_eq!(
            grid.rows(),
            vec![
                vec![1, 2, 3, 4],
                vec![5, 6, 10, 7],
                vec![8, 9, 11, 14],
                vec![12, 13, 0, 15],
            ]
        );
    }

    #[test]
    fn test_interior_tile_same_row_left() {
        let mut grid = board(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[10, 9, 0, 11],
            &[12, 13, 14, 15],
        ]);
        let seq = place_interior(&mut grid, Position::new(2, 2)).unwrap();
        assert_eq!(encode(&seq), "llurrdl");
        assert!(lower_row_invariant(&grid, 2, 1));
        assert_eq!(
            grid.rows(),
            vec![
                vec![1, 2, 3, 4],
                vec![6, 7, 9, 8],
                vec![5, 0, 10, 11],
                vec![12, 13, 14, 15],
            ]
        );
    }

    #[test]
    fn test_interior_tile_up_left() {
        let mut grid = board(&[
            &[1, 10, 3, 4],
            &[5, 6, 7, 8],
            &[2, 9, 0, 11],
            &[12, 13, 14, 15],
        ]);
        let seq = place_interior(&mut grid, Position::new(2, 2)).unwrap();
        assert_eq!(encode(&seq), "uuldrulddruld");
        assert!(lower_row_invariant(&grid, 2, 1));
        assert_eq!(
            grid.rows(),
            vec![
                vec![1, 3, 6, 4],
                vec![5, 7, 9, 8],
                vec![2, 0, 10, 11],
                vec![12, 13, 14, 15],
            ]
        );
    }

    #[test]
    fn test_interior_tile_up_right() {
        let mut grid = board(&[
            &[1, 6, 9, 8],
            &[4, 5, 2, 7],
            &[3, 0, 10, 11],
            &[12, 13, 14, 15],
        ]);
        let seq = place_interior(&mut grid, Position::new(2, 1)).unwrap();
        assert_eq!(encode(&seq), "uurdlulddruld");
        assert!(lower_row_invariant(&grid, 2, 0));
        assert_eq!(
            grid.rows(),
            vec![
                vec![4, 1, 2, 8],
                vec![5, 3, 6, 7],
                vec![0, 9, 10, 11],
                vec![12, 13, 14, 15],
            ]
        );
    }

    #[test]
    fn test_interior_precondition_rejected() {
        // Canonical grid has the blank at (0, 0), not at the target.
        let mut grid = Grid::new(4, 4).unwrap();
        assert_eq!(
            place_interior(&mut grid, Position::new(2, 1)),
            Err(SolveError::PreconditionViolated {
                phase: Phase::Interior,
                row: 2,
                col: 1,
            })
        );
    }

    #[test]
    fn test_col0_tile_one_above() {
        let mut grid = board(&[
            &[1, 6, 9, 8],
            &[4, 5, 2, 3],
            &[12, 10, 7, 11],
            &[0, 13, 14, 15],
        ]);
        let seq = place_col0(&mut grid, 3).unwrap();
        assert_eq!(encode(&seq), "urrr");
        assert!(lower_row_invariant(&grid, 2, 3));
    }

    #[test]
    fn test_col0_tile_straight_above() {
        let mut grid = board(&[
            &[1, 2, 3, 4],
            &[12, 5, 6, 7],
            &[8, 9, 10, 11],
            &[0, 13, 14, 15],
        ]);
        let seq = place_col0(&mut grid, 3).unwrap();
        assert_eq!(encode(&seq), "uurdlruldrdlurdluurddlurrr");
        assert!(lower_row_invariant(&grid, 2, 3));
        assert_eq!(
            grid.rows(),
            vec![
                vec![1, 2, 3, 4],
                vec![5, 8, 6, 7],
                vec![9, 10, 11, 0],
                vec![12, 13, 14, 15],
            ]
        );
    }

    #[test]
    fn test_col0_tile_up_right() {
        let mut grid = board(&[
            &[1, 2, 3, 4],
            &[5, 6, 12, 7],
            &[8, 9, 10, 11],
            &[0, 13, 14, 15],
        ]);
        let seq = place_col0(&mut grid, 3).unwrap();
        assert_eq!(encode(&seq), "uurrdllurdlurdlruldrdlurdluurddlurrr");
        assert!(lower_row_invariant(&grid, 2, 3));
        assert_eq!(
            grid.rows(),
            vec![
                vec![1, 2, 3, 4],
                vec![5, 8, 10, 7],
                vec![6, 9, 11, 0],
                vec![12, 13, 14, 15],
            ]
        );
    }

    #[test]
    fn test_col0_precondition_rejected() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert_eq!(
            place_col0(&mut grid, 3),
            Err(SolveError::PreconditionViolated {
                phase: Phase::Column0,
                row: 3,
                col: 0,
            })
        );
    }

    #[test]
    fn test_interior_leaves_frozen_region_alone() {
        let before = board(&[
            &[1, 6, 9, 8],
            &[4, 5, 2, 7],
            &[3, 0, 10, 11],
            &[12, 13, 14, 15],
        ]);
        let mut grid = before.deep_clone();
        place_interior(&mut grid, Position::new(2, 1)).unwrap();
        // Cells after the target in row-major order never change.
        for (row, col) in [(2, 2), (2, 3), (3, 0), (3, 1), (3, 2), (3, 3)] {
            assert_eq!(grid.get(row, col), before.get(row, col));
        }
    }
}
