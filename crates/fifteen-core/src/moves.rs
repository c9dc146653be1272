//! Blank-tile moves and their compact textual encoding.
//!
//! A move names the direction the blank travels; the tile it swaps with goes
//! the opposite way. Sequences serialize one character per move (`l`, `r`,
//! `u`, `d`), the same notation the solver's fixed patterns use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single blank-tile move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// All four moves, in codec order.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// The move that exactly undoes this one.
    pub fn inverse(self) -> Move {
        match self {
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Up => Move::Down,
            Move::Down => Move::Up,
        }
    }

    /// Single-character code used by the textual encoding.
    pub fn to_char(self) -> char {
        match self {
            Move::Left => 'l',
            Move::Right => 'r',
            Move::Up => 'u',
            Move::Down => 'd',
        }
    }

    /// Parse one code character; `None` for anything else.
    pub fn from_char(c: char) -> Option<Move> {
        match c {
            'l' => Some(Move::Left),
            'r' => Some(Move::Right),
            'u' => Some(Move::Up),
            'd' => Some(Move::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Error from decoding a move string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMoveError {
    /// A character outside `l`/`r`/`u`/`d`, with its position in the input.
    UnknownToken { token: char, index: usize },
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::UnknownToken { token, index } => {
                write!(f, "unknown move token {:?} at index {}", token, index)
            }
        }
    }
}

impl std::error::Error for ParseMoveError {}

/// Encode a move sequence as its compact string form.
pub fn encode(moves: &[Move]) -> String {
    moves.iter().map(|m| m.to_char()).collect()
}

/// Decode a move string; fails on the first unrecognized character.
pub fn decode(text: &str) -> Result<Vec<Move>, ParseMoveError> {
    text.chars()
        .enumerate()
        .map(|(index, token)| {
            Move::from_char(token).ok_or(ParseMoveError::UnknownToken { token, index })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(Move::Left.inverse(), Move::Right);
        assert_eq!(Move::Right.inverse(), Move::Left);
        assert_eq!(Move::Up.inverse(), Move::Down);
        assert_eq!(Move::Down.inverse(), Move::Up);
        for m in Move::ALL {
            assert_eq!(m.inverse().inverse(), m);
        }
    }

    #[test]
    fn test_char_round_trip() {
        for m in Move::ALL {
            assert_eq!(Move::from_char(m.to_char()), Some(m));
        }
        assert_eq!(Move::from_char('x'), None);
        assert_eq!(Move::from_char('L'), None);
    }

    #[test]
    fn test_encode() {
        let seq = vec![Move::Left, Move::Down, Move::Down, Move::Right, Move::Up];
        assert_eq!(encode(&seq), "lddru");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            decode("urdl").unwrap(),
            vec![Move::Up, Move::Right, Move::Down, Move::Left]
        );
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_unknown_token() {
        let err = decode("ldx").unwrap_err();
        assert_eq!(err, ParseMoveError::UnknownToken { token: 'x', index: 2 });
        let err = decode("Lddru").unwrap_err();
        assert_eq!(err, ParseMoveError::UnknownToken { token: 'L', index: 0 });
    }

    #[test]
    fn test_serde_round_trip() {
        let seq = vec![Move::Up, Move::Left, Move::Down];
        let json = serde_json::to_string(&seq).unwrap();
        let back: Vec<Move> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }
}
