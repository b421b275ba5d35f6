use anyhow::Result;
use corners_solver::engine::{CornerLayout, Puzzle};
use corners_solver::heuristics::{DistanceScale, HeuristicKind};
use corners_solver::solver::{solve_astar, SearchConfig};
use std::collections::HashMap;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;
const SCRAMBLE_LENGTH: usize = 10;
const MAX_EXPANSIONS: usize = 200_000;

#[derive(Default)]
struct Tally {
    expanded: Vec<usize>,
    path_lengths: Vec<usize>,
    unsolved: usize,
}

fn average(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base = SearchConfig::default().with_max_expansions(Some(MAX_EXPANSIONS));
    let strategies: Vec<(&str, SearchConfig)> = vec![
        ("Assign/2", base.clone()),
        ("Assign", base.clone().with_scale(DistanceScale::Steps)),
        ("Assign/moved", base.clone().with_scale(DistanceScale::Moved)),
        ("Nearest/2", base.clone().with_heuristic(HeuristicKind::NearestGoal)),
        ("Assign/2 w2", base.clone().with_weight(2.0)),
    ];

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    let layout = CornerLayout::new(6, 2, 2);

    println!(
        "Starting heuristic evaluation for {} scrambles of length {}...",
        NUM_RANDOM_BOARDS_FOR_EVALUATION, SCRAMBLE_LENGTH
    );

    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let current_seed = START_SEED + board_idx as u64;
        let puzzle = Puzzle::scrambled(layout, SCRAMBLE_LENGTH, current_seed)?;

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for (strategy_name, config) in &strategies {
            let report = solve_astar(&puzzle, config)?;
            let tally = tallies.entry(*strategy_name).or_default();
            tally.expanded.push(report.stats.expanded);

            if report.is_solved() {
                tally.path_lengths.push(report.moves().len());
                println!(
                    "  Strategy: {:<12}, Moves: {:<4}, Expanded: {}",
                    strategy_name,
                    report.moves().len(),
                    report.stats.expanded
                );
            } else {
                tally.unsolved += 1;
                println!(
                    "  Strategy: {:<12}, unsolved ({:?}), Expanded: {}",
                    strategy_name, report.outcome, report.stats.expanded
                );
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", NUM_RANDOM_BOARDS_FOR_EVALUATION);
    println!(
        "Strategies evaluated: {}",
        strategies.iter().map(|(name, _)| *name).collect::<Vec<&str>>().join(", ")
    );
    println!("\n--- Averages ---");

    let mut summary: Vec<(&str, f64, f64, usize)> = tallies
        .iter()
        .map(|(name, tally)| (*name, average(&tally.expanded), average(&tally.path_lengths), tally.unsolved))
        .collect();

    // Fewest expansions first
    summary.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (strategy_name, avg_expanded, avg_moves, unsolved) in summary {
        println!(
            "Strategy {:<12}: Average Expanded = {:.1}, Average Moves = {:.2}, Unsolved = {}",
            strategy_name, avg_expanded, avg_moves, unsolved
        );
    }
    Ok(())
}
