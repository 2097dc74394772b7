//! Common test utilities for the gridmc test suite.

use gridmc::{Cell, GridAgent, GridLayout};

/// Build a deterministically seeded agent with a sampled layout.
pub fn seeded_agent(punishments: usize, seed: u64) -> GridAgent {
    GridAgent::builder()
        .punishment_count(punishments)
        .seed(seed)
        .build()
}

/// Build a seeded agent on an explicit layout.
pub fn agent_with_layout(layout: GridLayout, seed: u64) -> GridAgent {
    GridAgent::builder().layout(layout).seed(seed).build()
}

/// Shorthand for a validated cell.
pub fn cell(row: usize, col: usize) -> Cell {
    Cell::new(row, col).expect("test cell within bounds")
}
