//! Grid scrambling by random legal blank moves.
//!
//! Walking the blank keeps every produced configuration reachable, so a
//! scrambled grid is always solvable. Seeded scrambles are reproducible.

use crate::grid::Grid;
use crate::moves::Move;

/// Random-walk scrambler over a grid's blank tile.
pub struct Scrambler {
    rng: SimpleRng,
}

impl Default for Scrambler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrambler {
    /// Scrambler seeded from the OS entropy source.
    pub fn new() -> Self {
        Scrambler {
            rng: SimpleRng::new(),
        }
    }

    /// Scrambler with a fixed seed; the same seed walks the same way.
    pub fn with_seed(seed: u64) -> Self {
        Scrambler {
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Apply `steps` random moves to `grid` and return the walk taken.
    ///
    /// A move that would undo the previous one is never chosen, so every
    /// step changes the configuration visited.
    pub fn scramble(&mut self, grid: &mut Grid, steps: usize) -> Vec<Move> {
        let mut walk = Vec::with_capacity(steps);
        let mut last: Option<Move> = None;
        for _ in 0..steps {
            let legal: Vec<Move> = Move::ALL
                .into_iter()
                .filter(|&mv| grid.can_apply(mv) && last != Some(mv.inverse()))
                .collect();
            if legal.is_empty() {
                break;
            }
            let mv = legal[self.rng.next_usize(legal.len())];
            if grid.apply(mv).is_ok() {
                walk.push(mv);
                last = Some(mv);
            }
        }
        walk
    }
}

/// Small PCG-style PRNG; keeps the core free of heavyweight RNG state.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        // getrandom covers wasm targets as well as native ones.
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Counter fallback when no OS entropy source exists.
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        let seed = u64::from_le_bytes(seed_bytes);
        Self::with_seed(seed)
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scramble_zero_steps_is_identity() {
        let mut grid = Grid::new(4, 4).unwrap();
        let walk = Scrambler::with_seed(1).scramble(&mut grid, 0);
        assert!(walk.is_empty());
        assert!(grid.is_solved());
    }

    #[test]
    fn test_scramble_emits_requested_steps() {
        let mut grid = Grid::new(3, 3).unwrap();
        let walk = Scrambler::with_seed(5).scramble(&mut grid, 40);
        assert_eq!(walk.len(), 40);
    }

    #[test]
    fn test_scramble_never_backtracks() {
        let mut grid = Grid::new(4, 4).unwrap();
        let walk = Scrambler::with_seed(11).scramble(&mut grid, 100);
        for pair in walk.windows(2) {
            assert_ne!(pair[1], pair[0].inverse());
        }
    }

    #[test]
    fn test_scramble_same_seed_same_walk() {
        let mut first = Grid::new(4, 4).unwrap();
        let mut second = Grid::new(4, 4).unwrap();
        let walk_a = Scrambler::with_seed(42).scramble(&mut first, 60);
        let walk_b = Scrambler::with_seed(42).scramble(&mut second, 60);
        assert_eq!(walk_a, walk_b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scramble_walk_replays_onto_fresh_grid() {
        let mut grid = Grid::new(3, 4).unwrap();
        let walk = Scrambler::with_seed(9).scramble(&mut grid, 50);
        let mut replay = Grid::new(3, 4).unwrap();
        replay.apply_sequence(&walk).unwrap();
        assert_eq!(replay, grid);
    }

    #[test]
    fn test_scramble_reversed_inverses_restore_canonical() {
        let mut grid = Grid::new(4, 4).unwrap();
        let walk = Scrambler::with_seed(21).scramble(&mut grid, 70);
        let undo: Vec<Move> = walk.iter().rev().map(|mv| mv.inverse()).collect();
        grid.apply_sequence(&undo).unwrap();
        assert!(grid.is_solved());
    }

    #[test]
    fn test_scramble_2x2_always_has_a_move() {
        // Even in a corner with one neighbor excluded as the undo move,
        // at least one direction stays legal.
        let mut grid = Grid::new(2, 2).unwrap();
        let walk = Scrambler::with_seed(3).scramble(&mut grid, 25);
        assert_eq!(walk.len(), 25);
    }
}
