//! Grid state and the move executor.
//!
//! A `Grid` owns a flat row-major tile array plus the blank's cached
//! position. After validated construction the tile multiset is exactly
//! `0..height*width`, and every mutation through [`Grid::apply`] preserves
//! that permutation invariant.

use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (row, col) cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Error from grid construction or a single grid operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Height or width below the 2x2 minimum the solver supports.
    TooSmall { height: usize, width: usize },
    /// Ragged input: a row's length disagrees with the first row's.
    ShapeMismatch { expected: usize, found: usize },
    /// A value outside `0..height*width`, or one seen twice.
    NotPermutation { value: usize },
    /// A full scan did not find the value. Cannot happen while the
    /// permutation invariant holds; treat as a fatal consistency failure.
    ValueNotFound { value: usize },
    /// The blank's neighbor in the moved direction is off the grid.
    OutOfBounds { mv: Move },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::TooSmall { height, width } => {
                write!(f, "grid must be at least 2x2, got {}x{}", height, width)
            }
            GridError::ShapeMismatch { expected, found } => {
                write!(f, "ragged rows: expected width {}, found {}", expected, found)
            }
            GridError::NotPermutation { value } => {
                write!(f, "tile value {} duplicated or out of range", value)
            }
            GridError::ValueNotFound { value } => {
                write!(f, "tile value {} not present in the grid", value)
            }
            GridError::OutOfBounds { mv } => {
                write!(f, "move '{}' would push the blank off the grid", mv)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Partial failure of [`Grid::apply_sequence`]: `applied` moves succeeded
/// before `mv` was rejected; the grid stays at the last valid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceError {
    pub applied: usize,
    pub mv: Move,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move '{}' rejected after {} moves were applied",
            self.mv, self.applied
        )
    }
}

impl std::error::Error for SequenceError {}

/// An N×M sliding-tile puzzle state.
///
/// The canonical solved arrangement stores `col + width * row` in every
/// cell, with the blank (value 0) at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    tiles: Vec<usize>,
    blank: Position,
}

impl Grid {
    /// Create the canonical solved grid of the given dimensions.
    pub fn new(height: usize, width: usize) -> Result<Grid, GridError> {
        if height < 2 || width < 2 {
            return Err(GridError::TooSmall { height, width });
        }
        Ok(Grid {
            height,
            width,
            tiles: (0..height * width).collect(),
            blank: Position::new(0, 0),
        })
    }

    /// Build a grid from nested rows, deep-copying and validating the input.
    pub fn from_rows(rows: &[Vec<usize>]) -> Result<Grid, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height < 2 || width < 2 {
            return Err(GridError::TooSmall { height, width });
        }
        let mut tiles = Vec::with_capacity(height * width);
        for row in rows {
            if row.len() != width {
                return Err(GridError::ShapeMismatch {
                    expected: width,
                    found: row.len(),
                });
            }
            tiles.extend_from_slice(row);
        }
        let mut seen = vec![false; tiles.len()];
        let mut blank = Position::new(0, 0);
        for (idx, &value) in tiles.iter().enumerate() {
            if value >= seen.len() || seen[value] {
                return Err(GridError::NotPermutation { value });
            }
            seen[value] = true;
            if value == 0 {
                blank = Position::new(idx / width, idx % width);
            }
        }
        Ok(Grid {
            height,
            width,
            tiles,
            blank,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Where the blank currently sits.
    pub fn blank(&self) -> Position {
        self.blank
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// In-crate read for coordinates already known to be in range.
    pub(crate) fn tile(&self, row: usize, col: usize) -> usize {
        self.tiles[self.idx(row, col)]
    }

    /// Raw read; `None` off the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(self.tiles[self.idx(row, col)])
        } else {
            None
        }
    }

    /// Raw write for callers doing their own bookkeeping; returns whether
    /// the cell exists. No permutation validation happens here: the caller
    /// must restore the invariant before solving. The blank cache follows
    /// writes of 0.
    pub fn set_unchecked(&mut self, row: usize, col: usize, value: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let idx = self.idx(row, col);
        self.tiles[idx] = value;
        if value == 0 {
            self.blank = Position::new(row, col);
        }
        true
    }

    /// Nested-rows snapshot of the current arrangement.
    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.tiles
            .chunks(self.width)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    /// Find the cell currently holding `value` by linear scan.
    pub fn locate(&self, value: usize) -> Result<Position, GridError> {
        for (idx, &tile) in self.tiles.iter().enumerate() {
            if tile == value {
                return Ok(Position::new(idx / self.width, idx % self.width));
            }
        }
        Err(GridError::ValueNotFound { value })
    }

    /// Where the tile whose solved position is `home` currently sits.
    pub fn current_position(&self, home: Position) -> Result<Position, GridError> {
        self.locate(home.row * self.width + home.col)
    }

    fn neighbor(&self, mv: Move) -> Option<Position> {
        let Position { row, col } = self.blank;
        match mv {
            Move::Left if col > 0 => Some(Position::new(row, col - 1)),
            Move::Right if col + 1 < self.width => Some(Position::new(row, col + 1)),
            Move::Up if row > 0 => Some(Position::new(row - 1, col)),
            Move::Down if row + 1 < self.height => Some(Position::new(row + 1, col)),
            _ => None,
        }
    }

    /// Whether `apply(mv)` would succeed from the current state.
    pub fn can_apply(&self, mv: Move) -> bool {
        self.neighbor(mv).is_some()
    }

    /// Swap the blank with its neighbor in the moved direction.
    pub fn apply(&mut self, mv: Move) -> Result<(), GridError> {
        let dest = self.neighbor(mv).ok_or(GridError::OutOfBounds { mv })?;
        let a = self.idx(self.blank.row, self.blank.col);
        let b = self.idx(dest.row, dest.col);
        self.tiles.swap(a, b);
        self.blank = dest;
        Ok(())
    }

    /// Apply an externally supplied sequence move by move. A rejected move
    /// stops the replay there and reports how far it got; the applied
    /// prefix stays in effect.
    pub fn apply_sequence(&mut self, moves: &[Move]) -> Result<(), SequenceError> {
        for (applied, &mv) in moves.iter().enumerate() {
            self.apply(mv).map_err(|_| SequenceError { applied, mv })?;
        }
        Ok(())
    }

    /// Whether every tile sits at its canonical position.
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(idx, &value)| idx == value)
    }

    /// Independent deep copy; mutating it never affects the original.
    pub fn deep_clone(&self) -> Grid {
        self.clone()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>2}", self.tile(row, col))?;
            }
        }
        Ok(())
    }
}
