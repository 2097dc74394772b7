//! Observer port - abstraction for run observation and data collection
//!
//! This port defines the interface for observing simulation events, allowing
//! composable data collection without coupling the episode loop to specific
//! output formats or metrics.

use crate::{Result, agent::EpisodeSummary, grid::StepRecord};

/// Observer trait for monitoring a simulation run.
///
/// Observers can be composed to collect different kinds of data during a
/// run: progress bars for user feedback, JSONL export for analysis, metrics
/// tracking for reporting.
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_run_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode_num)`
///    - `on_step(...)` - For each transition in the episode
///    - `on_episode_end(episode_num, summary)` - After the value update
/// 3. `on_run_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use gridmc::{EpisodeSummary, ports::Observer};
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode_num: usize,
///         _summary: &EpisodeSummary,
///     ) -> gridmc::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once when the run starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, after the episode state is reset.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to reset per-episode state.
    fn on_episode_start(&mut self, _episode_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each transition within an episode.
    ///
    /// # Parameters
    ///
    /// * `episode_num` - Index of the current episode (0-based)
    /// * `step_num` - Transition number within the episode (0-based)
    /// * `record` - Requested/executed directions and resulting position
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to observe individual transitions.
    fn on_step(&mut self, _episode_num: usize, _step_num: usize, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends, after the value-table update.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record episode outcomes.
    fn on_episode_end(&mut self, _episode_num: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called once when the run completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to perform cleanup or final reporting.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
