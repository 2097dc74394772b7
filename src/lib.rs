//! Tabular Monte-Carlo value learning on a stochastic grid world
//!
//! This crate provides:
//! - Rejection-sampled 10×10 grid layouts with reward and punishment cells
//! - A stochastic transition model with boundary-aware movement
//! - Every-visit Monte-Carlo value estimation over cell positions
//! - A greedy policy with edge padding and uniform tie-breaking
//! - A simulation pipeline with composable observers and a CLI

pub mod agent;
pub mod cli;
pub mod error;
pub mod export;
pub mod grid;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod types;

pub use agent::{EpisodeSummary, GridAgent, GridAgentBuilder};
pub use error::{Error, Result};
pub use grid::{EpisodeState, GridLayout, GridWorld, StepRecord, Termination};
pub use learning::{GreedyPolicy, RandomPolicy, ValueTable};
pub use pipeline::{RunResult, SimulationConfig, SimulationPipeline};
pub use types::{Cell, Direction, EDGE_PENALTY, GRID_SIZE, MOVE_FIDELITY};
