//! Transition-model properties: boundary behavior, path structure, score
//! range, and the 0.7/0.3 stochastic split.

mod common;

use common::{agent_with_layout, cell, seeded_agent};
use gridmc::{Direction, GridLayout, RandomPolicy, Termination};

#[test]
fn deterministic_walk_to_reward() {
    // Start at (5, 5) with the reward two cells to the right and no
    // punishments; forcing deterministic moves walks straight into it.
    let layout = GridLayout::from_parts(cell(5, 5), cell(5, 7), vec![]).unwrap();
    let mut agent = agent_with_layout(layout, 0);

    let first = agent.apply_move(Direction::Right);
    assert!(!first.ended);
    let second = agent.apply_move(Direction::Right);
    assert!(second.ended);

    assert_eq!(
        agent.episode().path(),
        &[cell(5, 5), cell(5, 6), cell(5, 7)]
    );
    assert_eq!(agent.episode().score(), 1);
    assert_eq!(agent.episode().termination(), Some(Termination::Reward));

    let summary = agent.conclude_episode();
    assert_eq!(summary.score, 1);
    assert_eq!(summary.steps, 2);
    for visited in [cell(5, 5), cell(5, 6), cell(5, 7)] {
        assert_eq!(agent.values().visit_count(visited), 1);
        assert_eq!(agent.values().mean_value(visited), 1.0);
    }
}

#[test]
fn boundary_move_penalizes_without_moving() {
    let layout = GridLayout::from_parts(cell(0, 0), cell(5, 5), vec![]).unwrap();
    let mut agent = agent_with_layout(layout, 0);

    let record = agent.apply_move(Direction::Up);
    assert!(record.ended);
    assert_eq!(record.position, cell(0, 0));
    assert_eq!(agent.episode().score(), -1);
    assert_eq!(agent.episode().path(), &[cell(0, 0), cell(0, 0)]);
    assert_eq!(agent.episode().termination(), Some(Termination::OffGrid));
}

#[test]
fn paths_start_at_initial_and_step_orthogonally() {
    let mut policy = RandomPolicy::new();
    for seed in 0..20 {
        let mut agent = seeded_agent(10, seed);
        let initial = agent.layout().initial_position();

        for _ in 0..20 {
            agent.run_episode(&mut policy);
            let path = agent.episode().path();

            assert_eq!(path[0], initial, "seed {seed}: path must start at spawn");
            for pair in path.windows(2) {
                let dr = pair[0].row.abs_diff(pair[1].row);
                let dc = pair[0].col.abs_diff(pair[1].col);
                assert!(
                    dr + dc <= 1,
                    "seed {seed}: {} -> {} is not one orthogonal step",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn final_scores_stay_in_contract_range() {
    let mut policy = RandomPolicy::new();
    for seed in 0..20 {
        let mut agent = seeded_agent(10, seed);
        for _ in 0..50 {
            let summary = agent.run_episode(&mut policy);
            assert!(
                matches!(summary.score, -2 | -1 | 1 | 2),
                "seed {seed}: unexpected final score {}",
                summary.score
            );
        }
    }
}

#[test]
fn stochastic_control_honors_the_fidelity_split() {
    // An open center cell: every act takes exactly one step and never ends
    // the episode, so each trial can be reset cleanly.
    let layout = GridLayout::from_parts(cell(5, 5), cell(9, 9), vec![]).unwrap();
    let mut agent = agent_with_layout(layout, 1234);

    let trials = 4000;
    let mut faithful = 0;
    for _ in 0..trials {
        agent.reset();
        let record = agent.act(Direction::Up);
        assert_eq!(record.requested, Direction::Up);
        if record.executed == Direction::Up {
            faithful += 1;
        } else {
            // A slip must pick one of the three other directions.
            assert_ne!(record.executed, Direction::Up);
        }
    }

    let rate = faithful as f64 / trials as f64;
    assert!(
        (0.6..0.8).contains(&rate),
        "fidelity rate {rate} strays far from 0.7"
    );
}

#[test]
fn every_act_appends_exactly_one_path_entry() {
    let mut agent = seeded_agent(10, 77);
    let mut policy = RandomPolicy::new();

    agent.reset();
    let mut expected_len = 1;
    while !agent.episode().is_end() {
        agent.step(&mut policy);
        expected_len += 1;
        assert_eq!(agent.episode().path().len(), expected_len);
    }
}
