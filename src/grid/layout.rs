//! Rejection-sampled placement of the reward, punishment, and start cells.

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::types::{Cell, GRID_SIZE};

/// Immutable-after-construction placement of one reward cell, a configured
/// number of punishment cells, and the agent's initial position.
///
/// All cells are pairwise distinct by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    initial_position: Cell,
    reward_cell: Cell,
    punishment_cells: Vec<Cell>,
}

impl GridLayout {
    /// Sample a layout with `punishment_count` punishment cells.
    ///
    /// Uniformly random cells are drawn and duplicates rejected until
    /// `punishment_count + 2` distinct cells are collected; the last drawn
    /// becomes the initial position and the one before it the reward cell.
    /// A seeded `rng` reproduces the layout bit-for-bit.
    ///
    /// Counts approaching the grid capacity (98 and above) make the
    /// rejection loop arbitrarily slow; keeping the count well below that
    /// is the caller's responsibility.
    pub fn sample(punishment_count: usize, rng: &mut StdRng) -> Self {
        let mut cells: Vec<Cell> = Vec::with_capacity(punishment_count + 2);
        while cells.len() < punishment_count + 2 {
            let candidate = Cell::new_unchecked(
                rng.random_range(0..GRID_SIZE),
                rng.random_range(0..GRID_SIZE),
            );
            if !cells.contains(&candidate) {
                cells.push(candidate);
            }
        }

        let initial_position = cells.pop().expect("sampling collected at least two cells");
        let reward_cell = cells.pop().expect("sampling collected at least two cells");

        GridLayout {
            initial_position,
            reward_cell,
            punishment_cells: cells,
        }
    }

    /// Build a layout from explicit cells.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] unless the initial
    /// position, reward cell, and every punishment cell are pairwise
    /// distinct.
    pub fn from_parts(
        initial_position: Cell,
        reward_cell: Cell,
        punishment_cells: Vec<Cell>,
    ) -> Result<Self, crate::Error> {
        let mut seen = vec![initial_position, reward_cell];
        seen.extend(punishment_cells.iter().copied());
        seen.sort_unstable();
        let before = seen.len();
        seen.dedup();
        if seen.len() != before {
            return Err(crate::Error::InvalidConfiguration {
                message: "layout cells must be pairwise distinct".to_string(),
            });
        }

        Ok(GridLayout {
            initial_position,
            reward_cell,
            punishment_cells,
        })
    }

    /// Where every episode starts.
    pub fn initial_position(&self) -> Cell {
        self.initial_position
    }

    /// The single absorbing reward cell.
    pub fn reward_cell(&self) -> Cell {
        self.reward_cell
    }

    /// The absorbing punishment cells.
    pub fn punishment_cells(&self) -> &[Cell] {
        &self.punishment_cells
    }

    pub fn punishment_count(&self) -> usize {
        self.punishment_cells.len()
    }

    pub fn is_punishment(&self, cell: Cell) -> bool {
        self.punishment_cells.contains(&cell)
    }
}
