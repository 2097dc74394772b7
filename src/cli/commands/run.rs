//! Run command - run a learning simulation and report results

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output,
    learning::{GreedyPolicy, RandomPolicy},
    pipeline::{
        JsonlObserver, MetricsObserver, ProgressObserver, RunResult, SimulationConfig,
        SimulationPipeline,
    },
    ports::Policy,
};

/// Largest punishment count the CLI accepts.
///
/// The library itself performs no such check; this guard only keeps the
/// binary from spinning forever in rejection sampling on a grid that has
/// no room left for distinct cells.
const MAX_PUNISHMENTS: usize = 97;

#[derive(Parser, Debug)]
#[command(about = "Run a learning simulation")]
pub struct RunArgs {
    /// Number of episodes to run
    #[arg(long, short = 'e', default_value_t = 500)]
    pub episodes: usize,

    /// Number of punishment cells in the grid
    #[arg(long, short = 'p', default_value_t = 10)]
    pub punishments: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Policy driving the agent (greedy or random)
    #[arg(long, default_value = "greedy")]
    pub policy: String,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional CSV export of the learned value table
    #[arg(long)]
    pub export_values: Option<PathBuf>,

    /// Print the final grid and value table
    #[arg(long, default_value_t = false)]
    pub show_grid: bool,
}

#[derive(Debug, Serialize)]
struct RunSummaryFile {
    run: RunResult,
    policy: String,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    episodes: usize,
    punishments: usize,
    seed: Option<u64>,
}

/// Parse a policy name into a boxed policy (e.g., "greedy" or "random")
fn parse_policy(value: &str) -> Result<Box<dyn Policy>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "greedy" => Ok(Box::new(GreedyPolicy::new())),
        "random" => Ok(Box::new(RandomPolicy::new())),
        other => Err(anyhow!(
            "Unknown policy '{other}'. Use 'greedy' or 'random'"
        )),
    }
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("run_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    if args.punishments > MAX_PUNISHMENTS {
        return Err(anyhow!(
            "Punishment count {} leaves no room for distinct reward and start cells (max {})",
            args.punishments,
            MAX_PUNISHMENTS
        ));
    }

    let mut policy = parse_policy(&args.policy)?;

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let config = SimulationConfig {
        episodes: args.episodes,
        punishment_count: args.punishments,
        seed: args.seed,
    };

    let mut pipeline = SimulationPipeline::new(config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline = pipeline.with_observer(Box::new(MetricsObserver::new()));

    if let Some(observations_path) = &args.observations {
        let jsonl_observer = JsonlObserver::new(observations_path)?;
        pipeline = pipeline.with_observer(Box::new(jsonl_observer));
    }

    let (agent, result) = pipeline.run(policy.as_mut())?;

    println!("\n=== Run Complete ===");
    println!("Policy: {}", policy.name());
    println!("Total episodes: {}", result.total_episodes);
    println!(
        "Rewards: {} ({:.1}%)",
        result.rewards,
        result.reward_rate * 100.0
    );
    println!("Punishments: {}", result.punishments);
    println!("Off-grid endings: {}", result.off_grid);
    println!("Mean score: {:.3}", result.mean_score);
    println!("Mean episode length: {:.2}", result.mean_steps);

    if args.show_grid {
        output::print_section("Final Grid");
        print!(
            "{}",
            output::render_layout(agent.layout(), agent.episode().path(), agent.position())
        );
        output::print_section("Mean Values");
        print!("{}", output::render_values(agent.values()));
    }

    if let Some(csv_path) = &args.export_values {
        crate::export::write_values_csv(agent.values(), csv_path)?;
        println!("\nValue table written to {}", csv_path.display());
    }

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!(
                "\nNormalizing summary path to {}",
                summary_path.display()
            );
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = RunSummaryFile {
            run: result,
            policy: policy.name().to_string(),
            metadata: SummaryMetadata {
                episodes: args.episodes,
                punishments: args.punishments,
                seed: args.seed,
            },
        };

        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
