//! Solver orchestrator.
//!
//! Sweeps the grid from the bottom-right corner upward: rows 2 and below
//! first (interior and column-0 phases), then the top two rows column by
//! column (row-1 and row-0 phases), then the final 2x2 block. Each phase
//! consumes one positional invariant and establishes the next; the
//! concatenation of everything emitted along the way is the solution.

mod lower_rows;
mod top_rows;
mod types;

use crate::grid::{Grid, Position};
use crate::moves::Move;

pub use types::{Phase, SolveError, TraceEvent};

// ==================== Move pattern vocabulary ====================
//
// Fixed cycles the phases are assembled from. Names describe what happens
// to the tile being placed; the blank always returns to a known cell
// relative to it.

/// Tile one row down, blank loops down its left side and ends above it.
pub(crate) const PULL_DOWN_LEFT: [Move; 5] =
    [Move::Left, Move::Down, Move::Down, Move::Right, Move::Up];
/// Mirror of `PULL_DOWN_LEFT` looping down the right side; column-0 walks.
pub(crate) const PULL_DOWN_RIGHT: [Move; 5] =
    [Move::Right, Move::Down, Move::Down, Move::Left, Move::Up];
/// Tile one column right, blank loops over the top and ends left of it.
pub(crate) const PUSH_RIGHT_OVER: [Move; 5] =
    [Move::Up, Move::Right, Move::Right, Move::Down, Move::Left];
/// Tile one column right, blank loops underneath instead.
pub(crate) const PUSH_RIGHT_UNDER: [Move; 5] =
    [Move::Down, Move::Right, Move::Right, Move::Up, Move::Left];
/// Tile one column left, blank loops over the top and ends right of it.
pub(crate) const PUSH_LEFT_OVER: [Move; 5] =
    [Move::Up, Move::Left, Move::Left, Move::Down, Move::Right];
/// Tile one column left, blank loops underneath instead.
pub(crate) const PUSH_LEFT_UNDER: [Move; 5] =
    [Move::Down, Move::Left, Move::Left, Move::Up, Move::Right];
/// Re-seats a column-0 tile from (row-1, 1) into (row, 0), leaving the
/// blank at (row-1, 1).
pub(crate) const COL0_TUCK: [Move; 19] = [
    Move::Right, Move::Up, Move::Left, Move::Down, Move::Right, Move::Down, Move::Left,
    Move::Up, Move::Right, Move::Down, Move::Left, Move::Up, Move::Up, Move::Right,
    Move::Down, Move::Down, Move::Left, Move::Up, Move::Right,
];
/// Re-seats a row-0 tile from (1, col-1) into (0, col), leaving the blank
/// at (1, col-1).
pub(crate) const ROW0_TUCK: [Move; 17] = [
    Move::Up, Move::Right, Move::Down, Move::Left, Move::Up, Move::Right, Move::Right,
    Move::Down, Move::Left, Move::Up, Move::Left, Move::Down, Move::Right, Move::Right,
    Move::Up, Move::Left, Move::Down,
];
/// One rotation of the three final-block tiles; the blank returns to (0, 0).
pub(crate) const BLOCK_SPIN: [Move; 4] = [Move::Down, Move::Right, Move::Up, Move::Left];

// ==================== Shared phase plumbing ====================

/// Find the cell holding `value`; absence mid-solve is a logic error.
pub(crate) fn find_tile(grid: &Grid, value: usize) -> Result<Position, SolveError> {
    grid.locate(value)
        .map_err(|_| SolveError::TileNotFound { value })
}

/// Apply an internally generated sequence; rejection is a logic error.
pub(crate) fn apply_all(grid: &mut Grid, moves: &[Move]) -> Result<(), SolveError> {
    for &mv in moves {
        grid.apply(mv).map_err(|_| SolveError::BlockedMove { mv })?;
    }
    Ok(())
}

/// Append `count` copies of `mv` to `seq`.
pub(crate) fn push_repeat(seq: &mut Vec<Move>, mv: Move, count: usize) {
    seq.extend(std::iter::repeat(mv).take(count));
}

/// Walk the blank straight to `dest`. Rising happens before the horizontal
/// leg so a row-0 destination is entered from above its own row, keeping
/// the home tile below it in place; descending happens after, through
/// cells the sweep has not frozen yet.
fn walk_blank_to(grid: &mut Grid, dest: Position) -> Result<Vec<Move>, SolveError> {
    let blank = grid.blank();
    let mut walk = Vec::new();
    if blank.row > dest.row {
        push_repeat(&mut walk, Move::Up, blank.row - dest.row);
    }
    if blank.col > dest.col {
        push_repeat(&mut walk, Move::Left, blank.col - dest.col);
    } else {
        push_repeat(&mut walk, Move::Right, dest.col - blank.col);
    }
    if dest.row > blank.row {
        push_repeat(&mut walk, Move::Down, dest.row - blank.row);
    }
    apply_all(grid, &walk)?;
    Ok(walk)
}

// ==================== Orchestrator ====================

/// Trace hook signature; called with borrowed event payloads mid-solve.
pub type TraceHook = Box<dyn FnMut(TraceEvent<'_>)>;

/// Constructive solver driving the five phases over a grid.
pub struct Solver {
    trace: Option<TraceHook>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver with no trace hook.
    pub fn new() -> Self {
        Solver { trace: None }
    }

    /// Create a solver that reports phase progress to `hook`.
    pub fn with_trace(hook: impl FnMut(TraceEvent<'_>) + 'static) -> Self {
        Solver {
            trace: Some(Box::new(hook)),
        }
    }

    fn emit(&mut self, event: TraceEvent<'_>) {
        if let Some(hook) = self.trace.as_mut() {
            hook(event);
        }
    }

    /// Solve `grid` in place, returning every move applied in order.
    ///
    /// On success the grid equals the canonical solved configuration and an
    /// already-solved input yields an empty sequence. A configuration
    /// unreachable by blank moves reports [`SolveError::Unsolvable`]; the
    /// other variants signal internal logic failures and leave the grid
    /// wherever the failing phase stopped.
    pub fn solve(&mut self, grid: &mut Grid) -> Result<Vec<Move>, SolveError> {
        let height = grid.height();
        let width = grid.width();
        let mut solution: Vec<Move> = Vec::new();

        // Rows 2 and below, swept row-major from the last cell. The linear
        // index doubles as the tile value for these targets.
        for value in (2 * width..height * width).rev() {
            let target = Position::new(value / width, value % width);
            if find_tile(grid, value)? == target {
                continue;
            }
            self.reposition(grid, target, &mut solution)?;
            let phase = if target.col == 0 {
                Phase::Column0
            } else {
                Phase::Interior
            };
            self.emit(TraceEvent::PhaseStart {
                phase,
                target,
                tile: find_tile(grid, value)?,
            });
            let seq = match phase {
                Phase::Column0 => lower_rows::place_col0(grid, target.row)?,
                _ => lower_rows::place_interior(grid, target)?,
            };
            self.emit(TraceEvent::PhaseDone { phase, moves: &seq, grid });
            solution.extend_from_slice(&seq);
        }

        // Top two rows, right to left, row 1 before row 0 in each column.
        for index in (4..2 * width).rev() {
            let target = Position::new(index % 2, index / 2);
            let value = target.row * width + target.col;
            if find_tile(grid, value)? == target {
                continue;
            }
            self.reposition(grid, target, &mut solution)?;
            let phase = if target.row == 0 { Phase::Row0 } else { Phase::Row1 };
            self.emit(TraceEvent::PhaseStart {
                phase,
                target,
                tile: find_tile(grid, value)?,
            });
            let seq = match phase {
                Phase::Row0 => top_rows::place_row0(grid, target.col)?,
                _ => top_rows::place_row1(grid, target.col)?,
            };
            self.emit(TraceEvent::PhaseDone { phase, moves: &seq, grid });
            solution.extend_from_slice(&seq);
        }

        // Final 2x2 block.
        if grid.tile(0, 0) != 0 || grid.tile(0, 1) != 1 {
            self.reposition(grid, Position::new(1, 1), &mut solution)?;
            self.emit(TraceEvent::PhaseStart {
                phase: Phase::FinalBlock,
                target: Position::new(0, 1),
                tile: find_tile(grid, 1)?,
            });
            let seq = top_rows::place_final_block(grid)?;
            self.emit(TraceEvent::PhaseDone {
                phase: Phase::FinalBlock,
                moves: &seq,
                grid,
            });
            solution.extend_from_slice(&seq);
        }

        // An odd permutation survives every phase mechanically; the only
        // place it can show is a terminal grid the phases could not finish.
        if !grid.is_solved() {
            return Err(SolveError::Unsolvable);
        }
        Ok(solution)
    }

    fn reposition(
        &mut self,
        grid: &mut Grid,
        dest: Position,
        solution: &mut Vec<Move>,
    ) -> Result<(), SolveError> {
        if grid.blank() != dest {
            let walk = walk_blank_to(grid, dest)?;
            self.emit(TraceEvent::Reposition { moves: &walk });
            solution.extend_from_slice(&walk);
        }
        Ok(())
    }
}

/// Solve `grid` in place with no trace hook. See [`Solver::solve`].
pub fn solve(grid: &mut Grid) -> Result<Vec<Move>, SolveError> {
    Solver::new().solve(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::encode;
    use crate::scramble::Scrambler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn board(rows: &[&[usize]]) -> Grid {
        let rows: Vec<Vec<usize>> = rows.iter().map(|row| row.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    fn assert_solves(mut grid: Grid) {
        let start = grid.deep_clone();
        let solution = solve(&mut grid).unwrap();
        assert!(grid.is_solved(), "grid not solved:\n{}", grid);
        // The returned sequence must replay to the same result on a fresh
        // copy of the input.
        let mut replay = start.deep_clone();
        replay.apply_sequence(&solution).unwrap();
        assert!(replay.is_solved());
    }

    #[test]
    fn test_solved_input_returns_empty_sequence() {
        let mut grid = Grid::new(3, 3).unwrap();
        let solution = solve(&mut grid).unwrap();
        assert!(solution.is_empty());
        assert!(grid.is_solved());
    }

    #[test]
    fn test_solve_reversed_3x3() {
        assert_solves(board(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]));
    }

    #[test]
    fn test_solve_two_row_4_wide() {
        // Only the row-0/row-1/final-block phases run on a 2-row grid.
        assert_solves(board(&[&[0, 3, 2, 7], &[4, 5, 6, 1]]));
    }

    #[test]
    fn test_solve_4x4_mid_state() {
        assert_solves(board(&[
            &[1, 6, 9, 8],
            &[4, 5, 2, 7],
            &[3, 0, 10, 11],
            &[12, 13, 14, 15],
        ]));
    }

    #[test]
    fn test_solve_4x5() {
        assert_solves(board(&[
            &[15, 16, 0, 3, 4],
            &[5, 6, 7, 8, 9],
            &[10, 11, 12, 13, 14],
            &[1, 2, 17, 18, 19],
        ]));
    }

    #[test]
    fn test_solve_3x6() {
        assert_solves(board(&[
            &[16, 7, 13, 17, 5, 9],
            &[3, 0, 14, 10, 12, 6],
            &[4, 15, 2, 11, 8, 1],
        ]));
    }

    #[test]
    fn test_solve_top_corner_swap() {
        // All phases skip; only the final block runs, entered via a single
        // downward blank walk.
        let mut grid = board(&[&[1, 0, 2], &[3, 4, 5], &[6, 7, 8]]);
        let solution = solve(&mut grid).unwrap();
        assert!(grid.is_solved());
        assert_eq!(encode(&solution), "dul");
    }

    #[test]
    fn test_solve_blank_below_row0_target() {
        // Everything outside the top-left corner starts solved and the
        // blank sits in row 1, so the first phase to run is a row-0 place
        // whose entry walk must rise before moving sideways.
        assert_solves(board(&[&[3, 4, 1], &[2, 0, 5], &[6, 7, 8]]));
        assert_solves(board(&[&[6, 1, 2, 4], &[5, 3, 0, 7]]));
    }

    #[test]
    fn test_solve_2x2_inputs() {
        assert_solves(board(&[&[1, 3], &[0, 2]]));
        for seed in 0..20 {
            let mut grid = Grid::new(2, 2).unwrap();
            Scrambler::with_seed(seed).scramble(&mut grid, 30);
            let start = grid.deep_clone();
            let solution = solve(&mut grid).unwrap();
            assert!(grid.is_solved());
            // At most one blank walk (right + down), the opening, and
            // three rotations.
            assert!(
                solution.len() <= 2 + 2 + 12,
                "block solution too long for seed {}: {}",
                seed,
                encode(&solution)
            );
            let mut replay = start;
            replay.apply_sequence(&solution).unwrap();
            assert!(replay.is_solved());
        }
    }

    #[test]
    fn test_solve_scrambled_sizes() {
        let sizes = [(2usize, 4usize), (3, 3), (3, 4), (4, 3), (4, 4), (4, 2), (5, 5)];
        for (round, &(height, width)) in sizes.iter().enumerate() {
            let mut grid = Grid::new(height, width).unwrap();
            Scrambler::with_seed(97 + round as u64).scramble(&mut grid, 80);
            assert_solves(grid);
        }
    }

    #[test]
    fn test_unsolvable_swapped_pair() {
        let mut grid = board(&[&[0, 2, 1], &[3, 4, 5], &[6, 7, 8]]);
        assert_eq!(solve(&mut grid), Err(SolveError::Unsolvable));
    }

    #[test]
    fn test_unsolvable_hidden_row1_swap() {
        // Every per-target check passes and even the final block looks
        // correct at (0,0)/(0,1); only the terminal verification can tell.
        let mut grid = board(&[&[0, 1, 2], &[4, 3, 5], &[6, 7, 8]]);
        assert_eq!(solve(&mut grid), Err(SolveError::Unsolvable));
    }

    #[test]
    fn test_unsolvable_2x2() {
        let mut grid = board(&[&[0, 1], &[3, 2]]);
        assert_eq!(solve(&mut grid), Err(SolveError::Unsolvable));
    }

    #[test]
    fn test_unsolvable_large_keeps_terminating() {
        // Odd permutation of a wider grid: every phase still terminates and
        // the verdict is unsolvable rather than a hang.
        let mut grid = board(&[
            &[0, 1, 2, 3],
            &[4, 5, 7, 6],
            &[8, 9, 10, 11],
            &[12, 13, 14, 15],
        ]);
        assert_eq!(solve(&mut grid), Err(SolveError::Unsolvable));
    }

    #[test]
    fn test_trace_reports_every_emitted_move() {
        let moves_seen = Rc::new(RefCell::new(0usize));
        let phases_seen = Rc::new(RefCell::new(Vec::new()));
        let moves_hook = Rc::clone(&moves_seen);
        let phases_hook = Rc::clone(&phases_seen);
        let mut solver = Solver::with_trace(move |event| match event {
            TraceEvent::PhaseStart { phase, .. } => phases_hook.borrow_mut().push(phase),
            TraceEvent::Reposition { moves } => *moves_hook.borrow_mut() += moves.len(),
            TraceEvent::PhaseDone { moves, .. } => *moves_hook.borrow_mut() += moves.len(),
        });
        let mut grid = board(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]);
        let solution = solver.solve(&mut grid).unwrap();
        assert!(grid.is_solved());
        assert_eq!(*moves_seen.borrow(), solution.len());
        let phases = phases_seen.borrow();
        assert!(phases.contains(&Phase::Interior));
        assert!(phases.contains(&Phase::Row0));
        assert!(phases.contains(&Phase::Row1));
    }

    #[test]
    fn test_solver_without_trace_is_silent_default() {
        let mut solver = Solver::default();
        let mut grid = board(&[&[0, 3, 2, 7], &[4, 5, 6, 1]]);
        solver.solve(&mut grid).unwrap();
        assert!(grid.is_solved());
    }
}
