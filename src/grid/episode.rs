//! Per-episode mutable state.

use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// Why an episode ended.
///
/// A boundary-blocked move onto a terminal cell re-marks the end, so the
/// recorded cause is the last mark written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Landed on the reward cell.
    Reward,
    /// Landed on a punishment cell.
    Punishment,
    /// Attempted to move off the grid.
    OffGrid,
}

/// Mutable record of the episode in progress: current position, the ordered
/// visit path, the termination flag, and the running score.
///
/// Reset at the start of every episode; the layout and value table are never
/// touched by a reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeState {
    position: Cell,
    path: Vec<Cell>,
    is_end: bool,
    score: i32,
    termination: Option<Termination>,
}

impl EpisodeState {
    /// Fresh episode starting at `start`.
    pub fn new(start: Cell) -> Self {
        EpisodeState {
            position: start,
            path: vec![start],
            is_end: false,
            score: 0,
            termination: None,
        }
    }

    /// Revert to the beginning of an episode starting at `start`.
    pub fn reset(&mut self, start: Cell) {
        self.position = start;
        self.path.clear();
        self.path.push(start);
        self.is_end = false;
        self.score = 0;
        self.termination = None;
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Every position occupied so far, starting with the initial position.
    /// One entry is appended per transition attempt, including blocked ones.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Set once the episode ends; `None` while it is live.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub(crate) fn set_position(&mut self, cell: Cell) {
        self.position = cell;
    }

    pub(crate) fn record_position(&mut self) {
        self.path.push(self.position);
    }

    pub(crate) fn penalize(&mut self) {
        self.score -= 1;
    }

    pub(crate) fn reward(&mut self) {
        self.score += 1;
    }

    pub(crate) fn end(&mut self, cause: Termination) {
        self.is_end = true;
        self.termination = Some(cause);
    }
}
