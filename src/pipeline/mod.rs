//! Simulation pipeline: configuration, episode loop, and observers.

pub mod observers;
pub mod simulation;

pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
    StepObservation,
};
pub use simulation::{RunResult, SimulationConfig, SimulationPipeline};
