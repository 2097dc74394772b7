//! Deterministic movement and the stochastic transition wrapper.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::{
    episode::{EpisodeState, Termination},
    layout::GridLayout,
};
use crate::types::{Cell, Direction, MOVE_FIDELITY};

/// Outcome of a single transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Direction requested by the caller.
    pub requested: Direction,
    /// Direction actually executed after any stochastic slip. Equal to
    /// `requested` for deterministic moves.
    pub executed: Direction,
    /// Position after the transition.
    pub position: Cell,
    /// Whether the episode ended on this transition.
    pub ended: bool,
}

/// The grid world: one sampled layout plus the episode currently running on
/// it.
#[derive(Debug, Clone)]
pub struct GridWorld {
    layout: GridLayout,
    episode: EpisodeState,
}

impl GridWorld {
    pub fn new(layout: GridLayout) -> Self {
        let episode = EpisodeState::new(layout.initial_position());
        GridWorld { layout, episode }
    }

    /// Revert to the beginning of an episode. The layout is untouched.
    pub fn reset(&mut self) {
        self.episode.reset(self.layout.initial_position());
    }

    /// Apply `direction` deterministically.
    ///
    /// A move blocked by the grid edge costs one point and ends the episode
    /// without changing position. The resulting position is appended to the
    /// path either way, and the terminal-cell checks run unconditionally
    /// afterwards, so a blocked move while standing on a terminal cell
    /// adjusts the score a second time and re-marks the end in the same
    /// call.
    ///
    /// # Panics
    ///
    /// Panics if the episode has already ended.
    pub fn apply_move(&mut self, direction: Direction) -> StepRecord {
        assert!(
            !self.episode.is_end(),
            "move attempted after episode end; reset first"
        );

        match self.episode.position().neighbor(direction) {
            Some(next) => self.episode.set_position(next),
            None => {
                self.episode.penalize();
                self.episode.end(Termination::OffGrid);
            }
        }

        self.episode.record_position();

        let position = self.episode.position();
        if self.layout.is_punishment(position) {
            self.episode.penalize();
            self.episode.end(Termination::Punishment);
        } else if position == self.layout.reward_cell() {
            self.episode.reward();
            self.episode.end(Termination::Reward);
        }

        StepRecord {
            requested: direction,
            executed: direction,
            position,
            ended: self.episode.is_end(),
        }
    }

    /// Apply `direction` under stochastic control.
    ///
    /// The requested direction is executed with probability
    /// [`MOVE_FIDELITY`]; otherwise one of the three other directions is
    /// chosen uniformly. Exactly one deterministic move happens per call.
    ///
    /// # Panics
    ///
    /// Panics if the episode has already ended.
    pub fn act(&mut self, direction: Direction, rng: &mut StdRng) -> StepRecord {
        let executed = if rng.random::<f64>() < MOVE_FIDELITY {
            direction
        } else {
            *direction.others().choose(rng).unwrap()
        };

        let record = self.apply_move(executed);
        StepRecord {
            requested: direction,
            ..record
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn episode(&self) -> &EpisodeState {
        &self.episode
    }
}
