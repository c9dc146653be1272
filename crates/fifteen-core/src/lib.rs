//! Sliding-tile ("fifteen") puzzle engine.
//!
//! Solves arbitrary H x W boards constructively: positional invariants
//! split the board into a frozen region and a working region, and five
//! phase solvers each seat one more tile without disturbing what is
//! already frozen. The returned solution is the concatenation of every
//! move emitted along the way.
//!
//! ```
//! use fifteen_core::{solve, Grid};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![
//!     vec![8, 7, 6],
//!     vec![5, 4, 3],
//!     vec![2, 1, 0],
//! ];
//! let mut grid = Grid::from_rows(&rows)?;
//! let solution = solve(&mut grid)?;
//! assert!(grid.is_solved());
//!
//! // The sequence replays against a fresh copy of the same start.
//! let mut replay = Grid::from_rows(&rows)?;
//! replay.apply_sequence(&solution)?;
//! assert!(replay.is_solved());
//! # Ok(())
//! # }
//! ```

mod grid;
mod invariant;
mod moves;
mod scramble;
mod solver;

pub use grid::{Grid, GridError, Position, SequenceError};
pub use invariant::{lower_row_invariant, row0_invariant, row1_invariant};
pub use moves::{decode, encode, Move, ParseMoveError};
pub use scramble::Scrambler;
pub use solver::{solve, Phase, SolveError, Solver, TraceEvent, TraceHook};
