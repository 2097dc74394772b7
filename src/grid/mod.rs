//! Grid world: layout sampling, episode state, and the transition model.

pub mod episode;
pub mod layout;
pub mod world;

pub use episode::{EpisodeState, Termination};
pub use layout::GridLayout;
pub use world::{GridWorld, StepRecord};
