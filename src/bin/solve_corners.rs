use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use corners_solver::engine::{CornerLayout, Puzzle, MAX_BOARD_SIZE};
use corners_solver::heuristics::{DistanceScale, HeuristicKind};
use corners_solver::solver::{
    solve_astar, solve_bfs, SearchConfig, SearchOutcome, SearchReport, DEFAULT_MAX_EXPANSIONS,
    DEFAULT_WEIGHT,
};
use corners_solver::utils::{board_from_str_array, format_move};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest swap of two corner blocks", long_about = None)]
struct Args {
    /// Board side (at most 8)
    #[arg(long, default_value_t = MAX_BOARD_SIZE)]
    size: usize,

    /// Rows in each corner block
    #[arg(long, default_value_t = 2)]
    block_rows: usize,

    /// Columns in each corner block
    #[arg(long, default_value_t = 2)]
    block_cols: usize,

    /// Heuristic weight; above 1 the path may no longer be the shortest
    #[arg(short, long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,

    /// Stop after this many expansions and print the best partial path
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = HeuristicArg::Assignment)]
    heuristic: HeuristicArg,

    /// How a piece's distance to its goal cell is turned into moves
    #[arg(long, value_enum, default_value_t = ScaleArg::Halved)]
    scale: ScaleArg,

    /// Start from this board (rows of W, B and .) instead of the corner layout
    #[arg(long, conflicts_with = "scramble")]
    board_file: Option<PathBuf>,

    /// Start this many random moves away from the goal
    #[arg(long)]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Use breadth-first search instead of A*
    #[arg(long)]
    bfs: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    /// Minimum-cost matching of pieces to goal cells
    Assignment,
    /// Each piece to its nearest goal cell
    Nearest,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScaleArg {
    /// One move per unit of distance
    Steps,
    /// One move per two units of distance
    Halved,
    /// One move per misplaced piece; never overestimates
    Moved,
}

impl From<ScaleArg> for DistanceScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Steps => DistanceScale::Steps,
            ScaleArg::Halved => DistanceScale::Halved,
            ScaleArg::Moved => DistanceScale::Moved,
        }
    }
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Assignment => HeuristicKind::Assignment,
            HeuristicArg::Nearest => HeuristicKind::NearestGoal,
        }
    }
}

fn read_board_file(path: &Path, layout: CornerLayout) -> Result<Puzzle> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let start = board_from_str_array(&lines)
        .with_context(|| format!("invalid board in {}", path.display()))?;
    let goal = CornerLayout { size: start.size(), ..layout }.goal()?;
    Ok(Puzzle::from_boards(start, goal)?)
}

fn build_puzzle(args: &Args) -> Result<Puzzle> {
    let layout = CornerLayout::new(args.size, args.block_rows, args.block_cols);
    let puzzle = match (&args.board_file, args.scramble) {
        (Some(path), _) => read_board_file(path, layout)?,
        (None, Some(walk)) => Puzzle::scrambled(layout, walk, args.seed)?,
        (None, None) => Puzzle::new(layout)?,
    };
    Ok(puzzle)
}

fn print_report(puzzle: &Puzzle, report: &SearchReport) -> Result<()> {
    let stats = &report.stats;
    println!(
        "Expanded {} boards, generated {}, skipped {} stale entries in {} ms\n",
        stats.expanded,
        stats.generated,
        stats.stale_skipped,
        stats.elapsed.as_millis()
    );

    let moves = match &report.outcome {
        SearchOutcome::Solved(moves) => {
            println!("Solution found ({} moves):", moves.len());
            moves
        }
        SearchOutcome::Unsolvable => {
            println!("No solution exists for this position.");
            return Ok(());
        }
        SearchOutcome::BudgetExhausted { partial, kind } => {
            println!(
                "Search budget ({:?}) exhausted; best partial path ({} moves):",
                kind,
                partial.len()
            );
            partial
        }
    };

    if moves.is_empty() {
        println!("  No moves made.");
    }
    for (i, mv) in moves.iter().enumerate() {
        println!("  Move {}: {}", i + 1, format_move(mv));
    }

    let final_board = puzzle.replay(moves)?;
    println!("\nFinal board state:\n{}\n", final_board);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let puzzle = build_puzzle(&args)?;
    println!("Initial board state:\n{}\n", puzzle.start());
    println!("Goal board state:\n{}\n", puzzle.goal());

    let report = if args.bfs {
        println!("Searching breadth-first...\n");
        solve_bfs(&puzzle, Some(args.max_expansions))
    } else {
        let config = SearchConfig::default()
            .with_weight(args.weight)
            .with_max_expansions(Some(args.max_expansions))
            .with_time_limit(args.time_limit_ms.map(Duration::from_millis))
            .with_heuristic(args.heuristic.into())
            .with_scale(args.scale.into());
        println!("Searching with weighted A* (w = {})...\n", config.weight);
        solve_astar(&puzzle, &config)?
    };

    print_report(&puzzle, &report)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
