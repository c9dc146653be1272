//! Shared solver types: phases, errors, trace events.

use crate::grid::{Grid, Position};
use crate::moves::Move;
use std::fmt;

/// The five phase solvers, in the order the orchestrator runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Interior,
    Column0,
    Row0,
    Row1,
    FinalBlock,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Interior => "interior tile",
            Phase::Column0 => "column-0 tile",
            Phase::Row0 => "row-0 tile",
            Phase::Row1 => "row-1 tile",
            Phase::FinalBlock => "final 2x2 block",
        };
        write!(f, "{}", name)
    }
}

/// Fatal failure of a solve.
///
/// Every variant except `Unsolvable` signals a logic error: the grid
/// reached a state the algorithm's invariants rule out, so continuing would
/// produce unverified moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// A phase was entered without its invariant holding.
    PreconditionViolated { phase: Phase, row: usize, col: usize },
    /// The tile destined for the current target is missing from the grid.
    TileNotFound { value: usize },
    /// The offset between target and tile fits no case of the phase.
    BadOffset {
        phase: Phase,
        move_row: isize,
        move_col: isize,
    },
    /// An internally generated move was rejected by the executor.
    BlockedMove { mv: Move },
    /// The configuration is not reachable by blank moves from the solved
    /// grid, so no move sequence can solve it.
    Unsolvable,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::PreconditionViolated { phase, row, col } => {
                write!(f, "{} phase entered at ({}, {}) without its invariant", phase, row, col)
            }
            SolveError::TileNotFound { value } => {
                write!(f, "tile {} is missing from the grid", value)
            }
            SolveError::BadOffset { phase, move_row, move_col } => {
                write!(f, "impossible tile offset ({}, {}) in {} phase", move_row, move_col, phase)
            }
            SolveError::BlockedMove { mv } => {
                write!(f, "internally generated move '{}' was rejected", mv)
            }
            SolveError::Unsolvable => {
                write!(f, "configuration is not reachable by blank moves")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Observability callback payloads.
///
/// Fired only while a trace hook is installed; correctness never depends on
/// them and the core itself never prints.
#[derive(Debug)]
pub enum TraceEvent<'a> {
    /// A phase is about to run: which target cell, and where its tile
    /// currently sits.
    PhaseStart {
        phase: Phase,
        target: Position,
        tile: Position,
    },
    /// The blank was walked straight to the next target cell.
    Reposition { moves: &'a [Move] },
    /// A phase finished, emitting `moves`; `grid` is the state it left.
    PhaseDone {
        phase: Phase,
        moves: &'a [Move],
        grid: &'a Grid,
    },
}
