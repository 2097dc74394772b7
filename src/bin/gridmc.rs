//! gridmc CLI - Monte-Carlo value learning on a stochastic grid world
//!
//! This CLI provides a unified interface for:
//! - Running learning simulations with configurable episode counts
//! - Inspecting sampled grid layouts
//! - Exporting run summaries and learned value tables

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridmc")]
#[command(version, about = "Monte-Carlo value learning on a stochastic grid world", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a learning simulation
    Run(gridmc::cli::commands::run::RunArgs),

    /// Sample and print a grid layout
    Layout(gridmc::cli::commands::layout::LayoutArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => gridmc::cli::commands::run::execute(args),
        Commands::Layout(args) => gridmc::cli::commands::layout::execute(args),
    }
}
