#![allow(clippy::too_many_arguments)]
#![allow(clippy::format_in_format_args)]

mod app;
mod game;
mod render;
mod stats;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fifteen_core::{encode, solve, Grid, Scrambler};
use game::Game;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Sliding-tile puzzle for the terminal
#[derive(Parser, Debug)]
#[command(name = "fifteen", version, about)]
struct Args {
    /// Board height
    #[arg(long, default_value_t = 4)]
    height: usize,

    /// Board width
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// Scramble walk length
    #[arg(long, default_value_t = 100)]
    scramble: usize,

    /// Seed for a reproducible scramble
    #[arg(long)]
    seed: Option<u64>,

    /// Resume the saved game
    #[arg(long)]
    resume: bool,

    /// Scramble, solve, print the solution and exit without the UI
    #[arg(long)]
    solve_only: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.solve_only {
        return solve_only(&args);
    }

    let (game, resume_missed) = starting_game(&args)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let mut app = App::new(game);
    if resume_missed {
        app.show_message("No saved game found; starting fresh");
    }

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// First game of the session: the save slot when `--resume` hits, a fresh
/// scramble otherwise.
fn starting_game(args: &Args) -> io::Result<(Game, bool)> {
    if args.resume {
        if let Some(game) = App::load_saved_game() {
            return Ok((game, false));
        }
        return Ok((new_game(args)?, true));
    }
    Ok((new_game(args)?, false))
}

fn new_game(args: &Args) -> io::Result<Game> {
    let seed = args.seed.unwrap_or_else(rand::random);
    Game::new(args.height, args.width, args.scramble, seed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn solve_only(args: &Args) -> io::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut grid = Grid::new(args.height, args.width)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let walk = Scrambler::with_seed(seed).scramble(&mut grid, args.scramble);

    println!(
        "{}x{} board, seed {}, scrambled with {} moves:",
        args.height,
        args.width,
        seed,
        walk.len()
    );
    println!("{}", grid);

    let mut scratch = grid.deep_clone();
    match solve(&mut scratch) {
        Ok(moves) => {
            println!("Solution ({} moves):", moves.len());
            println!("{}", encode(&moves));
            Ok(())
        }
        Err(e) => Err(io::Error::other(e)),
    }
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // The auto-solve replay needs a faster tick than idle play
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout so the timer keeps moving
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick the timer and the solve animation
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
