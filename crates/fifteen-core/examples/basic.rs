//! Basic example of using the fifteen puzzle engine

use fifteen_core::{encode, solve, Grid, Scrambler, Solver, TraceEvent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Scramble a fresh 4x4 board
    println!("Scrambling a 4x4 board (seed 2024)...\n");
    let mut grid = Grid::new(4, 4)?;
    let walk = Scrambler::with_seed(2024).scramble(&mut grid, 80);

    println!("Scrambled board:");
    println!("{}", grid);
    println!("Scramble walk: {} moves\n", walk.len());

    // Solve a copy so the scrambled original stays intact
    let mut working = grid.deep_clone();
    let solution = solve(&mut working)?;
    println!("Solution ({} moves): {}", solution.len(), encode(&solution));

    // Replay the solution onto the original to confirm it lands solved
    grid.apply_sequence(&solution)?;
    println!("Replayed onto the original: solved = {}\n", grid.is_solved());

    // Watch the phases go by with a trace hook
    println!("--- Tracing a 3x3 solve ---\n");
    let mut grid = Grid::new(3, 3)?;
    Scrambler::with_seed(7).scramble(&mut grid, 40);
    let mut solver = Solver::with_trace(|event| {
        if let TraceEvent::PhaseDone { phase, moves, .. } = event {
            println!("{}: {} moves", phase, moves.len());
        }
    });
    let solution = solver.solve(&mut grid)?;
    println!("\n3x3 solved in {} moves", solution.len());

    Ok(())
}
