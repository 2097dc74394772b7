//! Direction-selection policies.

use rand::{rngs::StdRng, seq::IndexedRandom};

use crate::{
    learning::table::ValueTable,
    ports::Policy,
    types::{Cell, Direction, EDGE_PENALTY},
};

/// Greedy policy over the learned mean-value grid.
///
/// Neighbor cells are scored in [`Direction::ALL`] order; off-grid neighbors
/// read a constant [`EDGE_PENALTY`], which keeps boundary violations
/// unattractive regardless of what the table has learned. Ties between
/// best-scoring directions are broken uniformly at random.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    edge_penalty: f64,
}

impl GreedyPolicy {
    pub fn new() -> Self {
        GreedyPolicy {
            edge_penalty: EDGE_PENALTY,
        }
    }

    /// Score of the neighbor in `direction`, with the padding constant
    /// standing in for anything off the grid.
    fn neighbor_score(&self, values: &ValueTable, position: Cell, direction: Direction) -> f64 {
        match position.neighbor(direction) {
            Some(cell) => values.mean_value(cell),
            None => self.edge_penalty,
        }
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for GreedyPolicy {
    fn select_direction(
        &mut self,
        values: &ValueTable,
        position: Cell,
        rng: &mut StdRng,
    ) -> Direction {
        let scores = Direction::ALL.map(|direction| self.neighbor_score(values, position, direction));
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let candidates: Vec<Direction> = Direction::ALL
            .iter()
            .zip(scores.iter())
            .filter(|&(_, &score)| score == best)
            .map(|(&direction, _)| direction)
            .collect();

        *candidates.choose(rng).unwrap()
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

/// Uniform random baseline policy.
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Policy for RandomPolicy {
    fn select_direction(
        &mut self,
        _values: &ValueTable,
        _position: Cell,
        rng: &mut StdRng,
    ) -> Direction {
        *Direction::ALL.choose(rng).unwrap()
    }

    fn name(&self) -> &str {
        "random"
    }
}
