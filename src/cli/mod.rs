//! CLI infrastructure for the gridmc toolkit
//!
//! This module provides the command-line interface for running simulations
//! and inspecting sampled grid layouts.

pub mod commands;
pub mod output;
