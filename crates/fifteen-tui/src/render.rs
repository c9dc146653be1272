use crate::app::{App, ScreenState};
use crate::stats::{format_time, SolveOutcome};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use fifteen_core::Grid;
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;
    execute!(stdout, Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        ScreenState::Solved => render_solved_screen(stdout, app, term_width)?,
        ScreenState::Stats => render_stats_screen(stdout, app, term_width, term_height)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Width of a cell's interior: the widest tile number plus one space each side.
fn cell_inner_width(grid: &Grid) -> usize {
    (grid.height() * grid.width() - 1).to_string().len() + 2
}

fn board_size(grid: &Grid) -> (u16, u16) {
    let cell_w = cell_inner_width(grid);
    let grid_w = (grid.width() * (cell_w + 1) + 1) as u16;
    let grid_h = (grid.height() * 2 + 1) as u16;
    (grid_w, grid_h)
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let (grid_w, grid_h) = board_size(app.game.grid());

    // Board on the left, info panel on the right, key help underneath
    let panel_w = 24u16;
    let total_width = grid_w + 3 + panel_w;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_h + 8 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + grid_w + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + grid_h + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.game.grid();
    let cell_w = cell_inner_width(grid);

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let border = {
        let segment = format!("{}+", "-".repeat(cell_w));
        format!("+{}", segment.repeat(grid.width()))
    };

    for row in 0..grid.height() {
        execute!(
            stdout,
            MoveTo(x, y + row as u16 * 2),
            SetForegroundColor(theme.border),
            Print(&border)
        )?;

        execute!(stdout, MoveTo(x, y + row as u16 * 2 + 1))?;
        for col in 0..grid.width() {
            execute!(stdout, SetForegroundColor(theme.border), Print("|"))?;
            render_cell(stdout, app, row, col, cell_w)?;
        }
        execute!(stdout, SetForegroundColor(theme.border), Print("|"))?;
    }

    execute!(
        stdout,
        MoveTo(x, y + grid.height() as u16 * 2),
        SetForegroundColor(theme.border),
        Print(&border)
    )?;

    Ok(())
}

fn render_cell(
    stdout: &mut io::Stdout,
    app: &App,
    row: usize,
    col: usize,
    cell_w: usize,
) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.game.grid();
    let value = match grid.get(row, col) {
        Some(value) => value,
        None => return Ok(()),
    };

    if value == 0 {
        execute!(
            stdout,
            SetBackgroundColor(theme.blank),
            Print(" ".repeat(cell_w)),
            SetBackgroundColor(theme.bg)
        )?;
        return Ok(());
    }

    let at_home = value == col + grid.width() * row;
    let color = if at_home {
        theme.tile_home
    } else {
        theme.tile_away
    };
    execute!(
        stdout,
        SetForegroundColor(color),
        Print(format!("{:>width$} ", value, width = cell_w - 1))
    )?;

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== FIFTEEN ===")
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Time: {:>12}", game.elapsed_string()))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("Moves: {:>11}", game.moves_count()))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!(
            "Board: {:>11}",
            format!("{}x{}", game.height(), game.width())
        ))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 5),
        SetForegroundColor(theme.info),
        Print(format!("Seed: {}", game.seed()))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print(format!("Scramble: {:>8}", game.scramble_steps()))
    )?;

    if game.is_paused() {
        execute!(
            stdout,
            MoveTo(x, y + 8),
            SetForegroundColor(theme.key),
            Print("PAUSED (p resumes)")
        )?;
    } else if app.pending_solver_moves() > 0 {
        execute!(
            stdout,
            MoveTo(x, y + 8),
            SetForegroundColor(theme.success),
            Print(format!("Auto-solving: {:>3} left", app.pending_solver_moves()))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("Arrows/hjkl", "Slide"),
        ("u", "Undo"),
        ("s", "Auto-solve"),
        ("Esc", "Cancel solve"),
        ("n", "New scramble"),
        ("p", "Pause"),
        ("w", "Save"),
        ("i", "Stats"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 4
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 26;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.message_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn render_solved_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let (grid_w, grid_h) = board_size(app.game.grid());

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let banner = "*** SOLVED ***";
    let banner_x = term_width.saturating_sub(banner.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(banner_x, 1),
        SetForegroundColor(theme.success),
        Print(banner)
    )?;

    let start_x = if term_width > grid_w {
        (term_width - grid_w) / 2
    } else {
        1
    };
    render_grid(stdout, app, start_x, 3)?;

    let how = if app.game.solver_used() {
        "with the auto-solver"
    } else {
        "by hand"
    };
    let summary = format!(
        "Time: {} | Moves: {} | Finished {}",
        app.game.elapsed_string(),
        app.game.moves_count(),
        how
    );
    let summary_x = term_width.saturating_sub(summary.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(summary_x, 3 + grid_h + 1),
        SetForegroundColor(theme.fg),
        Print(&summary)
    )?;

    let height = app.game.height();
    let width = app.game.width();
    let best = app.stats.player.board_stats(height, width);
    let best_line = match (best.best_time_secs, best.best_moves) {
        (Some(time), Some(moves)) => format!(
            "Best for {}x{}: {} / {} moves",
            height,
            width,
            format_time(time),
            moves
        ),
        _ => format!("No unassisted solve for {}x{} yet", height, width),
    };
    let best_x = term_width.saturating_sub(best_line.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(best_x, 3 + grid_h + 2),
        SetForegroundColor(theme.info),
        Print(&best_line)
    )?;

    let instr = "Press 'n' for a new scramble, 'i' for stats, 'q' to quit";
    let instr_x = term_width.saturating_sub(instr.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(instr_x, 3 + grid_h + 3),
        SetForegroundColor(theme.key),
        Print(instr)
    )?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_stats_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let player = &app.stats.player;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = "=== STATISTICS ===";
    let title_x = term_width.saturating_sub(title.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    let start_y = 3;
    let col1_x = 4u16;
    let col2_x = term_width / 2;

    execute!(
        stdout,
        MoveTo(col1_x, start_y),
        SetForegroundColor(theme.info),
        Print(format!("Total games: {}", player.total_games))
    )?;
    execute!(
        stdout,
        MoveTo(col1_x, start_y + 1),
        SetForegroundColor(theme.success),
        Print(format!("Solved by hand: {}", player.total_solved))
    )?;
    execute!(
        stdout,
        MoveTo(col1_x, start_y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Auto-solved: {}", player.total_assisted))
    )?;
    execute!(
        stdout,
        MoveTo(col1_x, start_y + 3),
        SetForegroundColor(theme.border),
        Print(format!("Abandoned: {}", player.total_abandoned))
    )?;
    execute!(
        stdout,
        MoveTo(col1_x, start_y + 5),
        SetForegroundColor(theme.fg),
        Print(format!("Solve rate: {:.1}%", player.solve_rate()))
    )?;
    execute!(
        stdout,
        MoveTo(col1_x, start_y + 6),
        SetForegroundColor(theme.info),
        Print(format!(
            "Play time: {}",
            format_time(player.total_play_time_secs)
        ))
    )?;

    // Per-board stats (right column)
    execute!(
        stdout,
        MoveTo(col2_x, start_y),
        SetForegroundColor(theme.fg),
        Print("By board:")
    )?;

    for (i, (key, board)) in app.stats.boards_played().iter().enumerate() {
        let y = start_y + 2 + (i as u16 * 3);
        if y + 2 >= term_height.saturating_sub(3) {
            break;
        }

        execute!(
            stdout,
            MoveTo(col2_x, y),
            SetForegroundColor(theme.key),
            Print(key)
        )?;
        execute!(
            stdout,
            MoveTo(col2_x + 2, y + 1),
            SetForegroundColor(theme.info),
            Print(format!(
                "Games: {} | Solved: {} ({:.0}%)",
                board.total_games,
                board.solved,
                board.solve_rate()
            ))
        )?;

        let best_str = board
            .best_time_secs
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        let avg_str = board
            .avg_time_secs()
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        let fewest = board
            .best_moves
            .map(|m| m.to_string())
            .unwrap_or_else(|| "--".to_string());
        execute!(
            stdout,
            MoveTo(col2_x + 2, y + 2),
            SetForegroundColor(theme.info),
            Print(format!(
                "Best: {} | Avg: {} | Fewest: {}",
                best_str, avg_str, fewest
            ))
        )?;
    }

    // Recent games (left column)
    execute!(
        stdout,
        MoveTo(col1_x, start_y + 8),
        SetForegroundColor(theme.fg),
        Print("Recent:")
    )?;
    for (i, record) in app.stats.recent_solves(5).iter().enumerate() {
        let outcome = match record.outcome {
            SolveOutcome::Solved => "solved",
            SolveOutcome::Assisted => "assisted",
            SolveOutcome::Abandoned => "abandoned",
        };
        execute!(
            stdout,
            MoveTo(col1_x, start_y + 9 + i as u16),
            SetForegroundColor(theme.info),
            Print(format!(
                "{}x{}  {}  {:>4} moves  {}",
                record.height,
                record.width,
                format_time(record.time_secs),
                record.moves,
                outcome
            ))
        )?;
    }

    // Navigation help
    let nav_y = term_height.saturating_sub(2);
    execute!(
        stdout,
        MoveTo(col1_x, nav_y),
        SetForegroundColor(theme.key),
        Print("Esc"),
        SetForegroundColor(theme.info),
        Print(" Back  "),
        SetForegroundColor(theme.key),
        Print("q"),
        SetForegroundColor(theme.info),
        Print(" Quit")
    )?;

    Ok(())
}
