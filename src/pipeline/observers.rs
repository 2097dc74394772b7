//! Observer implementations for simulation runs
//!
//! Observers allow composable data collection during a run without coupling
//! the episode loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::EpisodeSummary,
    grid::{StepRecord, Termination},
    ports::Observer,
    types::{Cell, Direction},
};

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    rewards: usize,
    punishments: usize,
    off_grid: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            rewards: 0,
            punishments: 0,
            off_grid: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "R:{} P:{} O:{}",
            self.rewards, self.punishments, self.off_grid
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode_num: usize, summary: &EpisodeSummary) -> Result<()> {
        match summary.termination {
            Termination::Reward => self.rewards += 1,
            Termination::Punishment => self.punishments += 1,
            Termination::OffGrid => self.off_grid += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks run metrics
pub struct MetricsObserver {
    rewards: usize,
    punishments: usize,
    off_grid: usize,
    total_episodes: usize,
    score_sum: i64,
    step_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            rewards: 0,
            punishments: 0,
            off_grid: 0,
            total_episodes: 0,
            score_sum: 0,
            step_counts: Vec::new(),
        }
    }

    /// Get current reward rate
    pub fn reward_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.rewards as f64 / self.total_episodes as f64
        }
    }

    /// Get mean final score
    pub fn mean_score(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.score_sum as f64 / self.total_episodes as f64
        }
    }

    /// Get mean episode length in transitions
    pub fn mean_steps(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            rewards: self.rewards,
            punishments: self.punishments,
            off_grid: self.off_grid,
            reward_rate: self.reward_rate(),
            mean_score: self.mean_score(),
            mean_steps: self.mean_steps(),
        }
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub rewards: usize,
    pub punishments: usize,
    pub off_grid: usize,
    pub reward_rate: f64,
    pub mean_score: f64,
    pub mean_steps: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_start(&mut self, _episode_num: usize) -> Result<()> {
        self.step_counts.push(0);
        Ok(())
    }

    fn on_step(&mut self, _episode_num: usize, _step_num: usize, _record: &StepRecord) -> Result<()> {
        if let Some(last) = self.step_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode_num: usize, summary: &EpisodeSummary) -> Result<()> {
        self.total_episodes += 1;
        self.score_sum += i64::from(summary.score);
        match summary.termination {
            Termination::Reward => self.rewards += 1,
            Termination::Punishment => self.punishments += 1,
            Termination::OffGrid => self.off_grid += 1,
        }
        Ok(())
    }
}

/// Observation of a single transition during an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    /// Transition number within the episode
    pub step_num: usize,
    /// Direction the policy requested
    pub requested: Direction,
    /// Direction executed after any slip
    pub executed: Direction,
    /// Position after the transition
    pub position: Cell,
}

/// Complete observation of one episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    /// Episode number
    pub episode_num: usize,
    /// Final score
    pub score: i32,
    /// Why the episode ended
    pub termination: Termination,
    /// Position the episode ended on
    pub final_position: Cell,
    /// Transitions in the episode
    pub steps: Vec<StepObservation>,
    /// Total transitions in the episode
    pub total_steps: usize,
}

/// JSONL observer - Exports one observation per episode in JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode_num: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode_num: usize, step_num: usize, record: &StepRecord) -> Result<()> {
        self.current_steps.push(StepObservation {
            step_num,
            requested: record.requested,
            executed: record.executed,
            position: record.position,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, episode_num: usize, summary: &EpisodeSummary) -> Result<()> {
        let observation = EpisodeObservation {
            episode_num,
            score: summary.score,
            termination: summary.termination,
            final_position: summary.final_position,
            total_steps: self.current_steps.len(),
            steps: self.current_steps.clone(),
        };

        // One JSON object per line
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}
