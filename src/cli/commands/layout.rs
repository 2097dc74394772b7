//! Layout command - sample and inspect a grid layout

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{agent::GridAgent, cli::output};

#[derive(Parser, Debug)]
#[command(about = "Sample and print a grid layout")]
pub struct LayoutArgs {
    /// Number of punishment cells in the grid
    #[arg(long, short = 'p', default_value_t = 10)]
    pub punishments: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: LayoutArgs) -> Result<()> {
    if args.punishments > 97 {
        return Err(anyhow!(
            "Punishment count {} leaves no room for distinct reward and start cells (max 97)",
            args.punishments
        ));
    }

    let mut builder = GridAgent::builder().punishment_count(args.punishments);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let agent = builder.build();
    let layout = agent.layout();

    output::print_section("Sampled Layout");
    output::print_kv("Initial position", &layout.initial_position().to_string());
    output::print_kv("Reward cell", &layout.reward_cell().to_string());
    output::print_kv(
        "Punishment cells",
        &layout.punishment_count().to_string(),
    );
    match args.seed {
        Some(seed) => output::print_kv("Seed", &seed.to_string()),
        None => output::print_kv("Seed", "none (OS entropy)"),
    }

    println!();
    print!(
        "{}",
        output::render_layout(layout, agent.episode().path(), agent.position())
    );

    Ok(())
}
