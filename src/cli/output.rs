//! Output formatting for the CLI
//!
//! The rendering helpers here are strictly read-only consumers of the final
//! simulation state (layout, path, position, value table).

use crate::{
    grid::GridLayout,
    learning::ValueTable,
    types::{Cell, GRID_SIZE},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render the layout with the visited path as an ASCII grid.
///
/// `R` marks the reward cell, `X` a punishment cell, `o` a visited cell,
/// `A` the current position, and `.` everything else.
pub fn render_layout(layout: &GridLayout, path: &[Cell], position: Cell) -> String {
    let mut grid = [['.'; GRID_SIZE]; GRID_SIZE];

    for cell in path {
        grid[cell.row][cell.col] = 'o';
    }
    for cell in layout.punishment_cells() {
        grid[cell.row][cell.col] = 'X';
    }
    let reward = layout.reward_cell();
    grid[reward.row][reward.col] = 'R';
    grid[position.row][position.col] = 'A';

    let mut out = String::with_capacity(GRID_SIZE * (2 * GRID_SIZE + 1));
    for row in grid {
        for (col, ch) in row.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }
            out.push(*ch);
        }
        out.push('\n');
    }
    out
}

/// Render the mean-value grid with fixed-width cells.
pub fn render_values(values: &ValueTable) -> String {
    let mut out = String::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let mean = values.mean_value(Cell { row, col });
            out.push_str(&format!("{mean:7.2}"));
        }
        out.push('\n');
    }
    out
}
