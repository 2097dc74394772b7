//! Episode controller driving repeated reset → policy → transition loops.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::{EpisodeSummary, GridAgent},
    grid::Termination,
    ports::{Observer, Policy},
};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Number of punishment cells in the sampled layout
    pub punishment_count: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            episodes: 500,
            punishment_count: 10,
            seed: None,
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Total episodes run
    pub total_episodes: usize,

    /// Episodes that ended on the reward cell
    pub rewards: usize,

    /// Episodes that ended on a punishment cell
    pub punishments: usize,

    /// Episodes that ended by running off the grid
    pub off_grid: usize,

    /// Reward rate
    pub reward_rate: f64,

    /// Mean final score per episode
    pub mean_score: f64,

    /// Mean transitions per episode
    pub mean_steps: f64,
}

impl RunResult {
    /// Aggregate per-episode summaries into a run result.
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        let total_episodes = summaries.len();
        let rewards = summaries
            .iter()
            .filter(|s| s.termination == Termination::Reward)
            .count();
        let punishments = summaries
            .iter()
            .filter(|s| s.termination == Termination::Punishment)
            .count();
        let off_grid = summaries
            .iter()
            .filter(|s| s.termination == Termination::OffGrid)
            .count();

        let (reward_rate, mean_score, mean_steps) = if total_episodes > 0 {
            let episodes = total_episodes as f64;
            (
                rewards as f64 / episodes,
                summaries.iter().map(|s| f64::from(s.score)).sum::<f64>() / episodes,
                summaries.iter().map(|s| s.steps as f64).sum::<f64>() / episodes,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Self {
            total_episodes,
            rewards,
            punishments,
            off_grid,
            reward_rate,
            mean_score,
            mean_steps,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Pipeline running a configured number of episodes under one policy.
///
/// Episodes are strictly sequential; the value table is updated at the
/// single episode-end point and nowhere else.
pub struct SimulationPipeline {
    config: SimulationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl SimulationPipeline {
    /// Create a new pipeline
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Build an agent from the configuration and run every episode.
    ///
    /// Returns the trained agent alongside the aggregated result so callers
    /// can inspect the learned value table and final episode state.
    pub fn run(&mut self, policy: &mut dyn Policy) -> Result<(GridAgent, RunResult)> {
        let mut builder = GridAgent::builder().punishment_count(self.config.punishment_count);
        if let Some(seed) = self.config.seed {
            builder = builder.seed(seed);
        }
        let mut agent = builder.build();

        let result = self.run_with_agent(&mut agent, policy)?;
        Ok((agent, result))
    }

    /// Run the configured number of episodes on an existing agent.
    pub fn run_with_agent(
        &mut self,
        agent: &mut GridAgent,
        policy: &mut dyn Policy,
    ) -> Result<RunResult> {
        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.episodes);
        for episode_num in 0..self.config.episodes {
            let summary = self.run_episode(episode_num, agent, policy)?;

            for observer in &mut self.observers {
                observer.on_episode_end(episode_num, &summary)?;
            }
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(RunResult::from_summaries(&summaries))
    }

    fn run_episode(
        &mut self,
        episode_num: usize,
        agent: &mut GridAgent,
        policy: &mut dyn Policy,
    ) -> Result<EpisodeSummary> {
        agent.reset();
        for observer in &mut self.observers {
            observer.on_episode_start(episode_num)?;
        }

        let mut step_num = 0;
        while !agent.episode().is_end() {
            let record = agent.step(policy);
            for observer in &mut self.observers {
                observer.on_step(episode_num, step_num, &record)?;
            }
            step_num += 1;
        }

        Ok(agent.conclude_episode())
    }
}
