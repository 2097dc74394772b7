//! Simulation pipeline integration: episode counts, observer lifecycle,
//! reproducibility, and JSONL export.

use std::sync::{Arc, Mutex};

use gridmc::{
    EpisodeSummary, GreedyPolicy, RandomPolicy, Result, SimulationConfig, SimulationPipeline,
    StepRecord,
    pipeline::JsonlObserver,
    ports::Observer,
};
use tempfile::tempdir;

#[derive(Debug, Default)]
struct Counts {
    run_start: usize,
    episode_start: usize,
    steps: usize,
    episode_end: usize,
    run_end: usize,
}

struct CountingObserver {
    counts: Arc<Mutex<Counts>>,
}

impl Observer for CountingObserver {
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        self.counts.lock().unwrap().run_start += 1;
        Ok(())
    }

    fn on_episode_start(&mut self, _episode_num: usize) -> Result<()> {
        self.counts.lock().unwrap().episode_start += 1;
        Ok(())
    }

    fn on_step(&mut self, _episode_num: usize, _step_num: usize, _record: &StepRecord) -> Result<()> {
        self.counts.lock().unwrap().steps += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode_num: usize, _summary: &EpisodeSummary) -> Result<()> {
        self.counts.lock().unwrap().episode_end += 1;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.counts.lock().unwrap().run_end += 1;
        Ok(())
    }
}

#[test]
fn pipeline_runs_every_configured_episode() {
    let config = SimulationConfig {
        episodes: 30,
        punishment_count: 10,
        seed: Some(11),
    };

    let mut pipeline = SimulationPipeline::new(config);
    let mut policy = GreedyPolicy::new();
    let (agent, result) = pipeline.run(&mut policy).unwrap();

    assert_eq!(result.total_episodes, 30);
    assert_eq!(result.rewards + result.punishments + result.off_grid, 30);
    assert!((0.0..=1.0).contains(&result.reward_rate));
    assert!(result.mean_steps >= 1.0);
    assert_eq!(
        agent.values().visit_count(agent.layout().initial_position()),
        30
    );
}

#[test]
fn observers_see_the_full_lifecycle() {
    let counts = Arc::new(Mutex::new(Counts::default()));
    let config = SimulationConfig {
        episodes: 12,
        punishment_count: 6,
        seed: Some(13),
    };

    let mut pipeline = SimulationPipeline::new(config).with_observer(Box::new(CountingObserver {
        counts: Arc::clone(&counts),
    }));
    let mut policy = RandomPolicy::new();
    let (_, result) = pipeline.run(&mut policy).unwrap();

    let counts = counts.lock().unwrap();
    assert_eq!(counts.run_start, 1);
    assert_eq!(counts.episode_start, 12);
    assert_eq!(counts.episode_end, 12);
    assert_eq!(counts.run_end, 1);
    // Every episode takes at least one transition.
    assert!(counts.steps >= 12);
    assert!((counts.steps as f64 - result.mean_steps * 12.0).abs() < 1e-9);
}

#[test]
fn seeded_pipelines_reproduce_results() {
    let config = SimulationConfig {
        episodes: 40,
        punishment_count: 9,
        seed: Some(99),
    };

    let run = |config: SimulationConfig| {
        let mut pipeline = SimulationPipeline::new(config);
        let mut policy = GreedyPolicy::new();
        pipeline.run(&mut policy).unwrap()
    };

    let (agent_a, result_a) = run(config.clone());
    let (agent_b, result_b) = run(config);

    assert_eq!(agent_a.layout(), agent_b.layout());
    assert_eq!(result_a.rewards, result_b.rewards);
    assert_eq!(result_a.punishments, result_b.punishments);
    assert_eq!(result_a.off_grid, result_b.off_grid);
    assert_eq!(result_a.mean_score, result_b.mean_score);
    assert_eq!(result_a.mean_steps, result_b.mean_steps);
    assert_eq!(agent_a.values(), agent_b.values());
}

#[test]
fn jsonl_observer_writes_one_line_per_episode() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("episodes.jsonl");

    let config = SimulationConfig {
        episodes: 8,
        punishment_count: 5,
        seed: Some(3),
    };
    let mut pipeline = SimulationPipeline::new(config)
        .with_observer(Box::new(JsonlObserver::new(&path).unwrap()));
    let mut policy = RandomPolicy::new();
    pipeline.run(&mut policy).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 8);

    for (episode_num, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["episode_num"], episode_num);
        assert!(parsed["score"].is_i64());
        assert!(parsed["termination"].is_string());
        assert_eq!(
            parsed["total_steps"].as_u64().unwrap(),
            parsed["steps"].as_array().unwrap().len() as u64
        );
    }
}

#[test]
fn run_result_round_trips_through_json() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("result.json");

    let config = SimulationConfig {
        episodes: 5,
        punishment_count: 4,
        seed: Some(21),
    };
    let mut pipeline = SimulationPipeline::new(config);
    let mut policy = GreedyPolicy::new();
    let (_, result) = pipeline.run(&mut policy).unwrap();

    result.save(&path).unwrap();
    let loaded = gridmc::RunResult::load(&path).unwrap();
    assert_eq!(loaded.total_episodes, result.total_episodes);
    assert_eq!(loaded.rewards, result.rewards);
    assert_eq!(loaded.mean_score, result.mean_score);
}
