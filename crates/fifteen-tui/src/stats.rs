use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// How a recorded game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Solved by the player alone
    Solved,
    /// Finished with help from the auto-solver
    Assisted,
    /// Left unfinished
    Abandoned,
}

/// Record of a single played game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRecord {
    /// Unique record ID
    pub id: u64,
    /// Board height
    pub height: usize,
    /// Board width
    pub width: usize,
    /// Scramble seed (for replaying the same board)
    pub seed: u64,
    /// Length of the scramble walk
    pub scramble_steps: usize,
    /// How the game ended
    pub outcome: SolveOutcome,
    /// Moves made
    pub moves: usize,
    /// Time spent in seconds
    pub time_secs: u64,
    /// Unix timestamp when the game ended
    pub timestamp: u64,
}

/// Statistics for one board size
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardStats {
    pub total_games: usize,
    pub solved: usize,
    pub assisted: usize,
    pub abandoned: usize,
    pub best_time_secs: Option<u64>,
    pub best_moves: Option<usize>,
    pub total_time_secs: u64,
    pub total_moves: usize,
}

impl BoardStats {
    pub fn avg_time_secs(&self) -> Option<u64> {
        if self.solved > 0 {
            Some(self.total_time_secs / self.solved as u64)
        } else {
            None
        }
    }

    pub fn solve_rate(&self) -> f32 {
        if self.total_games > 0 {
            self.solved as f32 / self.total_games as f32 * 100.0
        } else {
            0.0
        }
    }
}

/// Overall player statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_games: usize,
    pub total_solved: usize,
    pub total_assisted: usize,
    pub total_abandoned: usize,
    pub total_play_time_secs: u64,
    /// Per-size stats keyed by "HxW"
    pub by_board: HashMap<String, BoardStats>,
}

impl PlayerStats {
    pub fn solve_rate(&self) -> f32 {
        if self.total_games > 0 {
            self.total_solved as f32 / self.total_games as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn board_stats(&self, height: usize, width: usize) -> BoardStats {
        self.by_board
            .get(&board_key(height, width))
            .cloned()
            .unwrap_or_default()
    }
}

fn board_key(height: usize, width: usize) -> String {
    format!("{}x{}", height, width)
}

/// The main statistics manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsManager {
    /// Player stats
    pub player: PlayerStats,
    /// All game records (most recent first)
    pub history: Vec<SolveRecord>,
    /// Next record ID
    next_id: u64,
    /// Where the stats file lives (not serialized)
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for StatsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsManager {
    pub fn new() -> Self {
        Self {
            player: PlayerStats::default(),
            history: Vec::new(),
            next_id: 1,
            path: None,
        }
    }

    /// Get the default stats file path
    fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fifteen_stats.json")
    }

    /// Load stats from the platform data directory
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load stats from an explicit path
    pub fn load_from(path: PathBuf) -> Self {
        let mut stats: Self = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        // The path is skipped during (de)serialization; restore it here
        stats.path = Some(path);
        stats
    }

    /// Save stats to file
    pub fn save(&self) {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path(),
        };
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, json);
        }
    }

    /// Record a finished or abandoned game
    pub fn record_solve(
        &mut self,
        height: usize,
        width: usize,
        seed: u64,
        scramble_steps: usize,
        outcome: SolveOutcome,
        moves: usize,
        time_secs: u64,
    ) -> &SolveRecord {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let record = SolveRecord {
            id: self.next_id,
            height,
            width,
            seed,
            scramble_steps,
            outcome,
            moves,
            time_secs,
            timestamp,
        };
        self.next_id += 1;

        self.player.total_games += 1;
        self.player.total_play_time_secs += time_secs;
        match outcome {
            SolveOutcome::Solved => self.player.total_solved += 1,
            SolveOutcome::Assisted => self.player.total_assisted += 1,
            SolveOutcome::Abandoned => self.player.total_abandoned += 1,
        }

        let board = self
            .player
            .by_board
            .entry(board_key(height, width))
            .or_default();
        board.total_games += 1;
        match outcome {
            SolveOutcome::Solved => {
                board.solved += 1;
                board.total_time_secs += time_secs;
                board.total_moves += moves;

                // Best marks count unassisted solves only
                match board.best_time_secs {
                    Some(best) => board.best_time_secs = Some(best.min(time_secs)),
                    None => board.best_time_secs = Some(time_secs),
                }
                match board.best_moves {
                    Some(best) => board.best_moves = Some(best.min(moves)),
                    None => board.best_moves = Some(moves),
                }
            }
            SolveOutcome::Assisted => board.assisted += 1,
            SolveOutcome::Abandoned => board.abandoned += 1,
        }

        // Most recent first
        self.history.insert(0, record);
        if self.history.len() > 1000 {
            self.history.truncate(1000);
        }

        self.save();

        &self.history[0]
    }

    /// Get recent games
    pub fn recent_solves(&self, limit: usize) -> &[SolveRecord] {
        let end = limit.min(self.history.len());
        &self.history[..end]
    }

    /// Board sizes seen so far, smallest first
    pub fn boards_played(&self) -> Vec<(String, BoardStats)> {
        let mut boards: Vec<(String, BoardStats)> = self
            .player
            .by_board
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        boards.sort_by_key(|(key, _)| parse_board_key(key));
        boards
    }
}

fn parse_board_key(key: &str) -> (usize, usize) {
    let mut parts = key.splitn(2, 'x');
    let height = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let width = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (height, width)
}

/// Format seconds as MM:SS or HH:MM:SS
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}
