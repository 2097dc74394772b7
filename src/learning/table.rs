//! Positional value estimates accumulated across episodes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Cell, GRID_SIZE};

/// Three parallel 10×10 grids tracking per-cell returns, visit counts, and
/// mean values, persisted across episodes.
///
/// [`ValueTable::record_episode`] applies the every-visit Monte Carlo rule:
/// the episode's final score is credited once to every distinct cell the
/// path touched, and the mean grid is then recomputed in full from the
/// running sums, never drifted incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    return_sum: Vec<Vec<f64>>,
    visit_count: Vec<Vec<u64>>,
    mean_value: Vec<Vec<f64>>,
}

impl ValueTable {
    /// Create an all-zero table.
    pub fn new() -> Self {
        ValueTable {
            return_sum: vec![vec![0.0; GRID_SIZE]; GRID_SIZE],
            visit_count: vec![vec![0; GRID_SIZE]; GRID_SIZE],
            mean_value: vec![vec![0.0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Cumulative score credited to `cell` across all episodes that
    /// visited it.
    pub fn return_sum(&self, cell: Cell) -> f64 {
        self.return_sum[cell.row][cell.col]
    }

    /// Number of episodes in which `cell` appeared at least once.
    pub fn visit_count(&self, cell: Cell) -> u64 {
        self.visit_count[cell.row][cell.col]
    }

    /// Mean return for `cell`; zero-visit cells keep their prior value
    /// (0 if never visited).
    pub fn mean_value(&self, cell: Cell) -> f64 {
        self.mean_value[cell.row][cell.col]
    }

    /// Credit a finished episode's final `score` to every distinct cell in
    /// `path`, then recompute the mean grid.
    pub fn record_episode(&mut self, path: &[Cell], score: i32) {
        let unique: HashSet<Cell> = path.iter().copied().collect();
        for cell in unique {
            self.return_sum[cell.row][cell.col] += f64::from(score);
            self.visit_count[cell.row][cell.col] += 1;
        }
        self.recompute_means();
    }

    /// Recompute `mean_value = return_sum / visit_count` elementwise,
    /// skipping unvisited cells so no division by zero occurs.
    fn recompute_means(&mut self) {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let visits = self.visit_count[row][col];
                if visits > 0 {
                    self.mean_value[row][col] = self.return_sum[row][col] / visits as f64;
                }
            }
        }
    }

    /// Iterate over every cell with its running statistics, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, f64, u64, f64)> + '_ {
        (0..GRID_SIZE).flat_map(move |row| {
            (0..GRID_SIZE).map(move |col| {
                let cell = Cell::new_unchecked(row, col);
                (
                    cell,
                    self.return_sum[row][col],
                    self.visit_count[row][col],
                    self.mean_value[row][col],
                )
            })
        })
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}
