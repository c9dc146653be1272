use fifteen_core::{decode, encode, Grid, GridError, Move, Scrambler};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A puzzle session: the board plus the bookkeeping the UI needs around it.
pub struct Game {
    grid: Grid,
    /// Moves applied since the scramble, oldest first.
    history: Vec<Move>,
    scramble_steps: usize,
    seed: u64,
    start_time: Instant,
    elapsed: Duration,
    paused: bool,
    completed: bool,
    /// How many of the applied moves came from the auto-solver.
    solver_moves: usize,
}

impl Game {
    /// Start a fresh game scrambled with the given seed.
    pub fn new(
        height: usize,
        width: usize,
        scramble_steps: usize,
        seed: u64,
    ) -> Result<Self, GridError> {
        let mut grid = Grid::new(height, width)?;
        Scrambler::with_seed(seed).scramble(&mut grid, scramble_steps);
        let completed = grid.is_solved();

        Ok(Self {
            grid,
            history: Vec::new(),
            scramble_steps,
            seed,
            start_time: Instant::now(),
            elapsed: Duration::from_secs(0),
            paused: false,
            completed,
            solver_moves: 0,
        })
    }

    /// Get the current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Seed the scramble was generated from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Length of the scramble walk this game started from
    pub fn scramble_steps(&self) -> usize {
        self.scramble_steps
    }

    /// Total moves made since the scramble
    pub fn moves_count(&self) -> usize {
        self.history.len()
    }

    /// Whether the auto-solver contributed any of the moves
    pub fn solver_used(&self) -> bool {
        self.solver_moves > 0
    }

    /// Check if the game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Check if the game is completed
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed().as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }

        if self.paused {
            // Resume: reset start time, keeping elapsed
            self.start_time = Instant::now();
        } else {
            // Pause: save current elapsed
            self.elapsed += self.start_time.elapsed();
        }
        self.paused = !self.paused;
    }

    /// Apply one blank move. Returns false when the move is off the board
    /// or the game is paused or already complete.
    pub fn slide(&mut self, mv: Move) -> bool {
        if self.completed || self.paused {
            return false;
        }
        if self.grid.apply(mv).is_err() {
            return false;
        }
        self.history.push(mv);

        if self.grid.is_solved() {
            self.completed = true;
            self.elapsed += self.start_time.elapsed();
        }
        true
    }

    /// Apply one move on behalf of the auto-solver.
    pub fn slide_assisted(&mut self, mv: Move) -> bool {
        let applied = self.slide(mv);
        if applied {
            self.solver_moves += 1;
        }
        applied
    }

    /// Take back the most recent move by replaying its inverse.
    pub fn undo(&mut self) -> bool {
        if self.completed || self.paused {
            return false;
        }
        let mv = match self.history.pop() {
            Some(mv) => mv,
            None => return false,
        };
        if self.grid.apply(mv.inverse()).is_err() {
            self.history.push(mv);
            return false;
        }
        true
    }

    /// Serialize the game state for saving
    pub fn serialize(&self) -> String {
        let state = SaveState {
            rows: self.grid.rows(),
            history: encode(&self.history),
            scramble_steps: self.scramble_steps,
            seed: self.seed,
            elapsed_secs: self.elapsed().as_secs(),
            solver_moves: self.solver_moves,
        };
        serde_json::to_string(&state).unwrap_or_default()
    }

    /// Deserialize a saved game state
    pub fn deserialize(json: &str) -> Option<Self> {
        let state: SaveState = serde_json::from_str(json).ok()?;

        let grid = Grid::from_rows(&state.rows).ok()?;
        let history = decode(&state.history).ok()?;
        let completed = grid.is_solved();

        Some(Self {
            grid,
            history,
            scramble_steps: state.scramble_steps,
            seed: state.seed,
            start_time: Instant::now(),
            elapsed: Duration::from_secs(state.elapsed_secs),
            paused: true, // Start paused when loading
            completed,
            solver_moves: state.solver_moves,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct SaveState {
    rows: Vec<Vec<usize>>,
    history: String,
    scramble_steps: usize,
    seed: u64,
    elapsed_secs: u64,
    solver_moves: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(rows: &str, elapsed_secs: u64) -> Game {
        let json = format!(
            r#"{{"rows":{},"history":"","scramble_steps":4,"seed":9,"elapsed_secs":{},"solver_moves":0}}"#,
            rows, elapsed_secs
        );
        Game::deserialize(&json).unwrap()
    }

    #[test]
    fn test_new_game_has_requested_shape() {
        let game = Game::new(3, 4, 25, 5).unwrap();
        assert_eq!(game.height(), 3);
        assert_eq!(game.width(), 4);
        assert_eq!(game.moves_count(), 0);
        assert_eq!(game.seed(), 5);
        assert_eq!(game.scramble_steps(), 25);
    }

    #[test]
    fn test_same_seed_scrambles_identically() {
        let a = Game::new(4, 4, 60, 1234).unwrap();
        let b = Game::new(4, 4, 60, 1234).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_new_game_rejects_tiny_board() {
        assert!(Game::new(1, 4, 10, 0).is_err());
    }

    #[test]
    fn test_loaded_game_starts_paused() {
        let game = saved("[[3,1,2],[0,4,5],[6,7,8]]", 30);
        assert!(game.is_paused());
        assert!(!game.is_completed());
        assert_eq!(game.elapsed().as_secs(), 30);
    }

    #[test]
    fn test_slide_refused_while_paused() {
        let mut game = saved("[[3,1,2],[0,4,5],[6,7,8]]", 0);
        assert!(!game.slide(Move::Down));
        assert_eq!(game.moves_count(), 0);
    }

    #[test]
    fn test_slide_and_undo_restore_state() {
        let mut game = saved("[[3,1,2],[0,4,5],[6,7,8]]", 0);
        game.toggle_pause();

        assert!(game.slide(Move::Down));
        assert_eq!(
            game.grid().rows(),
            vec![vec![3, 1, 2], vec![6, 4, 5], vec![0, 7, 8]]
        );
        assert_eq!(game.moves_count(), 1);

        assert!(game.undo());
        assert_eq!(
            game.grid().rows(),
            vec![vec![3, 1, 2], vec![0, 4, 5], vec![6, 7, 8]]
        );
        assert_eq!(game.moves_count(), 0);
        assert!(!game.undo());
    }

    #[test]
    fn test_completing_the_board_locks_the_game() {
        let mut game = saved("[[3,1,2],[0,4,5],[6,7,8]]", 0);
        game.toggle_pause();

        assert!(game.slide(Move::Up));
        assert!(game.is_completed());
        assert!(!game.solver_used());

        // Finished games accept no further input.
        assert!(!game.slide(Move::Down));
        assert!(!game.undo());
    }

    #[test]
    fn test_assisted_moves_are_counted() {
        let mut game = saved("[[1,0],[2,3]]", 0);
        game.toggle_pause();

        assert!(game.slide_assisted(Move::Left));
        assert!(game.is_completed());
        assert!(game.solver_used());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut game = saved("[[3,1,2],[0,4,5],[6,7,8]]", 30);
        game.toggle_pause();
        assert!(game.slide(Move::Down));
        assert!(game.slide(Move::Right));

        let json = game.serialize();
        let loaded = Game::deserialize(&json).unwrap();

        assert_eq!(loaded.grid(), game.grid());
        assert_eq!(loaded.moves_count(), 2);
        assert_eq!(loaded.seed(), 9);
        assert_eq!(loaded.scramble_steps(), 4);
        assert_eq!(loaded.elapsed().as_secs(), 30);
        assert!(loaded.is_paused());
    }

    #[test]
    fn test_deserialize_rejects_bad_board() {
        let json = r#"{"rows":[[0,1],[2,2]],"history":"","scramble_steps":4,"seed":9,"elapsed_secs":0,"solver_moves":0}"#;
        assert!(Game::deserialize(json).is_none());
    }

    #[test]
    fn test_elapsed_string_formats_minutes_and_seconds() {
        let game = saved("[[3,1,2],[0,4,5],[6,7,8]]", 605);
        assert_eq!(game.elapsed_string(), "10:05");
    }
}
