use crate::game::Game;
use crate::stats::{SolveOutcome, StatsManager};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use fifteen_core::{solve, Move};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Finished-board screen
    Solved,
    /// Statistics screen
    Stats,
}

/// Key → the blank move that pushes a tile the way the key points.
/// Arrow keys describe the tile being pushed; the blank moves the other way.
fn tile_push_move(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Move::Down),
        KeyCode::Down | KeyCode::Char('j') => Some(Move::Up),
        KeyCode::Left | KeyCode::Char('h') => Some(Move::Right),
        KeyCode::Right | KeyCode::Char('l') => Some(Move::Left),
        _ => None,
    }
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Color theme
    pub theme: Theme,
    /// Which theme is active (cycled with 't')
    theme_index: usize,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Statistics manager
    pub stats: StatsManager,
    /// Whether the current game has been recorded (to avoid double recording)
    game_recorded: bool,
    /// Solver moves still waiting to be replayed, one per tick
    solve_queue: VecDeque<Move>,
}

impl App {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            theme: Theme::dark(),
            theme_index: 0,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            stats: StatsManager::load(),
            game_recorded: false,
            solve_queue: VecDeque::new(),
        }
    }

    /// Path of the single save slot
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fifteen_save.json")
    }

    /// Load the saved game, if any
    pub fn load_saved_game() -> Option<Game> {
        let json = fs::read_to_string(Self::save_path()).ok()?;
        Game::deserialize(&json)
    }

    /// Moves the auto-solve still has queued
    pub fn pending_solver_moves(&self) -> usize {
        self.solve_queue.len()
    }

    /// Get the tick rate based on what is on screen
    pub fn get_tick_rate(&self) -> Duration {
        if self.screen_state == ScreenState::Playing && !self.solve_queue.is_empty() {
            Duration::from_millis(33) // 30 FPS while the auto-solve replays
        } else {
            Duration::from_millis(100) // 10 FPS for normal screens
        }
    }

    /// Update timers and the solve animation (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Playing {
            if !self.game.is_paused() {
                if let Some(mv) = self.solve_queue.pop_front() {
                    if !self.game.slide_assisted(mv) {
                        self.solve_queue.clear();
                    }
                }
            }

            // game_recorded doubles as the transition latch so Esc can show
            // the finished board without bouncing straight back here.
            if self.game.is_completed() && !self.game_recorded {
                self.record_finished_game();
                self.screen_state = ScreenState::Solved;
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Playing => self.handle_game_key(key),
            ScreenState::Solved => self.handle_solved_key(key),
            ScreenState::Stats => self.handle_stats_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        if let Some(mv) = tile_push_move(key.code) {
            self.slide(mv);
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.record_abandoned();
                return AppAction::Quit;
            }
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('s') => self.start_auto_solve(),
            KeyCode::Esc => self.cancel_auto_solve(),
            KeyCode::Char('n') => self.new_scramble(),
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.game.toggle_pause();
                if self.game.is_paused() {
                    self.show_message("Paused");
                }
            }
            KeyCode::Char('w') => self.save_game(),
            KeyCode::Char('i') => self.screen_state = ScreenState::Stats,
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_solved_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => self.new_scramble(),
            KeyCode::Char('i') => self.screen_state = ScreenState::Stats,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Esc => self.screen_state = ScreenState::Playing,
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc | KeyCode::Char('i') => {
                self.screen_state = if self.game.is_completed() {
                    ScreenState::Solved
                } else {
                    ScreenState::Playing
                };
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Player slide; takes over from a running auto-solve.
    fn slide(&mut self, mv: Move) {
        if !self.solve_queue.is_empty() {
            self.cancel_auto_solve();
        }
        if !self.game.slide(mv) && self.game.is_paused() {
            self.show_message("Paused; press p to resume");
        }
    }

    fn undo(&mut self) {
        self.cancel_auto_solve();
        if self.game.is_paused() {
            self.show_message("Paused; press p to resume");
        } else if !self.game.undo() {
            self.show_message("Nothing to undo");
        }
    }

    fn start_auto_solve(&mut self) {
        if self.game.is_completed() || !self.solve_queue.is_empty() {
            return;
        }
        if self.game.is_paused() {
            self.show_message("Paused; press p to resume");
            return;
        }

        let mut scratch = self.game.grid().deep_clone();
        match solve(&mut scratch) {
            Ok(moves) => {
                self.show_message(&format!("Auto-solving in {} moves (Esc cancels)", moves.len()));
                self.solve_queue = moves.into();
            }
            Err(e) => self.show_message(&format!("Auto-solve failed: {}", e)),
        }
    }

    fn cancel_auto_solve(&mut self) {
        if !self.solve_queue.is_empty() {
            self.solve_queue.clear();
            self.show_message("Auto-solve cancelled");
        }
    }

    fn new_scramble(&mut self) {
        self.record_abandoned();

        let seed = rand::random::<u64>();
        match Game::new(
            self.game.height(),
            self.game.width(),
            self.game.scramble_steps(),
            seed,
        ) {
            Ok(game) => {
                self.game = game;
                self.game_recorded = false;
                self.solve_queue.clear();
                self.screen_state = ScreenState::Playing;
                self.show_message(&format!("New scramble (seed {})", seed));
            }
            Err(e) => self.show_message(&format!("Could not scramble: {}", e)),
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % 3;
        let name = match self.theme_index {
            0 => {
                self.theme = Theme::dark();
                "dark"
            }
            1 => {
                self.theme = Theme::light();
                "light"
            }
            _ => {
                self.theme = Theme::high_contrast();
                "high contrast"
            }
        };
        self.show_message(&format!("Theme: {}", name));
    }

    fn save_game(&mut self) {
        match fs::write(Self::save_path(), self.game.serialize()) {
            Ok(_) => self.show_message("Game saved (resume with --resume)"),
            Err(_) => self.show_message("Failed to save game"),
        }
    }

    fn record_finished_game(&mut self) {
        if self.game_recorded {
            return;
        }
        self.game_recorded = true;

        // A zero-step scramble arrives already solved; nothing was played.
        if self.game.moves_count() == 0 {
            return;
        }

        let outcome = if self.game.solver_used() {
            SolveOutcome::Assisted
        } else {
            SolveOutcome::Solved
        };
        self.stats.record_solve(
            self.game.height(),
            self.game.width(),
            self.game.seed(),
            self.game.scramble_steps(),
            outcome,
            self.game.moves_count(),
            self.game.elapsed().as_secs(),
        );
    }

    fn record_abandoned(&mut self) {
        if self.game_recorded || self.game.is_completed() || self.game.moves_count() == 0 {
            return;
        }
        self.game_recorded = true;

        self.stats.record_solve(
            self.game.height(),
            self.game.width(),
            self.game.seed(),
            self.game.scramble_steps(),
            SolveOutcome::Abandoned,
            self.game.moves_count(),
            self.game.elapsed().as_secs(),
        );
    }
}
