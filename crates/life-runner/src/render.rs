//! Text rendering of the grid.

use life_core::Position;
use life_world::Simulation;

const ALIVE: char = '#';
const DEAD: char = '.';

/// Status line shown above each frame
pub fn caption(generation: u64) -> String {
    format!("Life - Generation {}", generation)
}

/// One line per row, `#` for live cells
pub fn frame(sim: &Simulation) -> String {
    let width = sim.grid().width();
    let mut out = String::with_capacity(sim.grid().len() + sim.grid().height() as usize);

    sim.for_each_cell(|pos, alive| {
        out.push(if alive { ALIVE } else { DEAD });
        if pos.col == width - 1 {
            out.push('\n');
        }
    });

    out
}

/// Grid cell under a pixel coordinate, `x` running along columns
pub fn cell_at(x: i32, y: i32, cell_size: i32) -> Position {
    Position::new(y.div_euclid(cell_size), x.div_euclid(cell_size))
}
