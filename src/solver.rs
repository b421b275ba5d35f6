//! Weighted A* over puzzle boards, plus a breadth-first baseline.
//!
//! Nodes live in an arena (`Vec<Node>`) and point at their parent by index,
//! so a node's back-link is fixed the moment it is pushed. The frontier holds
//! arena indices ordered by `g + w·h`.
use crate::engine::{Board, Move, Puzzle};
use crate::error::{PuzzleError, Result};
use crate::heuristics::{DistanceScale, GoalCells, HeuristicKind};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Heuristic weight giving plain (unweighted) A*. Paths are shortest only
/// when the distance scale never overestimates, as with
/// [`DistanceScale::Moved`]; the default `Halved` scale can.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Expansion budget used when the caller does not pick one.
pub const DEFAULT_MAX_EXPANSIONS: usize = 5_000_000;

/// A progress line is logged every this many expansions.
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Tuning knobs for [`solve_astar`].
///
/// `weight` multiplies the heuristic in the priority `g + weight·h`. At 1.0
/// the search returns a shortest path whenever the heuristic never
/// overestimates, which the default `Halved` scale only guarantees while no
/// jump chain is longer than one leg. Anything above 1.0 usually expands far fewer nodes but the
/// returned path may be longer than the optimum (by at most a factor of
/// `weight` when the heuristic is admissible).
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub weight: f64,
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
    pub scale: DistanceScale,
    pub heuristic: HeuristicKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            weight: DEFAULT_WEIGHT,
            max_expansions: Some(DEFAULT_MAX_EXPANSIONS),
            time_limit: None,
            scale: DistanceScale::default(),
            heuristic: HeuristicKind::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// `None` removes the expansion cap entirely.
    pub fn with_max_expansions(mut self, max_expansions: Option<usize>) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_scale(mut self, scale: DistanceScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// # Errors
    /// `InvalidWeight` unless the weight is finite and at least 1.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight < 1.0 {
            return Err(PuzzleError::InvalidWeight {
                weight: self.weight,
            });
        }
        Ok(())
    }

    fn priority(&self, g: u32, h: u32) -> f64 {
        f64::from(g) + self.weight * f64::from(h)
    }

    fn budget_hit(&self, expanded: usize, started: Instant) -> Option<BudgetKind> {
        if self.max_expansions.is_some_and(|cap| expanded >= cap) {
            return Some(BudgetKind::Expansions);
        }
        if self.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            return Some(BudgetKind::Time);
        }
        None
    }
}

/// Which budget stopped a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetKind {
    Expansions,
    Time,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Moves from the start to the goal; empty when the start is the goal.
    Solved(Vec<Move>),
    /// Every reachable board was explored without meeting the goal.
    Unsolvable,
    /// A budget ran out first. `partial` leads from the start to the most
    /// promising board expanded so far.
    BudgetExhausted { partial: Vec<Move>, kind: BudgetKind },
}

/// Counters collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub stale_skipped: usize,
    pub elapsed: Duration,
}

/// Outcome and counters of one search.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchReport {
    /// The solution, or an empty slice if the goal was not reached.
    pub fn moves(&self) -> &[Move] {
        match &self.outcome {
            SearchOutcome::Solved(moves) => moves,
            _ => &[],
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }

    pub fn budget_exhausted(&self) -> Option<BudgetKind> {
        match self.outcome {
            SearchOutcome::BudgetExhausted { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

struct Node {
    board: Board,
    g: u32,
    h: u32,
    parent: Option<usize>,
    mv: Option<Move>,
}

/// Frontier entry. `BinaryHeap` is a max-heap, so the ordering is reversed on
/// `f`; among equal `f` the deeper node wins, then the older one.
struct FrontierEntry {
    f: f64,
    g: u32,
    node: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Follows parent links from `index` back to the root and returns the moves
/// in start-to-end order.
fn reconstruct_path(arena: &[Node], index: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut cursor = Some(index);
    while let Some(i) = cursor {
        let node = &arena[i];
        if let Some(mv) = node.mv {
            moves.push(mv);
        }
        cursor = node.parent;
    }
    moves.reverse();
    moves
}

/// Solves `puzzle` with weighted A*.
///
/// Each distinct board is expanded at most once. A popped entry whose `g` is
/// above the best `g` recorded for its board is stale and skipped. The search
/// stops at the goal, when the frontier empties, or when a budget from
/// `config` runs out; the last two are reported through
/// [`SearchOutcome`] rather than as errors.
///
/// # Errors
/// `InvalidWeight` if `config` does not validate.
///
/// # Examples
/// ```
/// use corners_solver::engine::{CornerLayout, Puzzle};
/// use corners_solver::solver::{solve_astar, SearchConfig};
///
/// let puzzle = Puzzle::new(CornerLayout::new(4, 1, 1)).unwrap();
/// let report = solve_astar(&puzzle, &SearchConfig::default()).unwrap();
/// assert!(report.is_solved());
/// assert_eq!(report.moves().len(), 11);
/// assert_eq!(puzzle.replay(report.moves()).unwrap(), *puzzle.goal());
/// ```
pub fn solve_astar(puzzle: &Puzzle, config: &SearchConfig) -> Result<SearchReport> {
    config.validate()?;
    let started = Instant::now();
    let mut stats = SearchStats::default();

    let start = *puzzle.start();
    if puzzle.is_solved(&start) {
        info!("start position is already the goal");
        stats.elapsed = started.elapsed();
        return Ok(SearchReport {
            outcome: SearchOutcome::Solved(Vec::new()),
            stats,
        });
    }

    let goals = GoalCells::from_board(puzzle.goal());
    let estimate = |board: &Board| config.heuristic.estimate(board, &goals, config.scale);

    let h0 = estimate(&start);
    info!(h = h0, weight = config.weight, "weighted A* started");

    let mut arena = vec![Node {
        board: start,
        g: 0,
        h: h0,
        parent: None,
        mv: None,
    }];
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        f: config.priority(0, h0),
        g: 0,
        node: 0,
    });
    let mut best_g: FxHashMap<Board, u32> = FxHashMap::default();
    best_g.insert(start, 0);
    let mut closed: FxHashSet<Board> = FxHashSet::default();
    let mut most_promising = 0usize;

    while let Some(entry) = frontier.pop() {
        let Node { board, g, h, .. } = arena[entry.node];

        if closed.contains(&board) || best_g.get(&board).is_some_and(|&best| g > best) {
            stats.stale_skipped += 1;
            continue;
        }

        if puzzle.is_solved(&board) {
            stats.elapsed = started.elapsed();
            let moves = reconstruct_path(&arena, entry.node);
            info!(
                moves = moves.len(),
                expanded = stats.expanded,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                "weighted A* reached the goal"
            );
            return Ok(SearchReport {
                outcome: SearchOutcome::Solved(moves),
                stats,
            });
        }

        if let Some(kind) = config.budget_hit(stats.expanded, started) {
            stats.elapsed = started.elapsed();
            warn!(
                ?kind,
                expanded = stats.expanded,
                best_h = arena[most_promising].h,
                "search budget exhausted, returning partial path"
            );
            return Ok(SearchReport {
                outcome: SearchOutcome::BudgetExhausted {
                    partial: reconstruct_path(&arena, most_promising),
                    kind,
                },
                stats,
            });
        }

        closed.insert(board);
        stats.expanded += 1;
        let best = &arena[most_promising];
        if (h, g) < (best.h, best.g) {
            most_promising = entry.node;
        }

        if stats.expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                expanded = stats.expanded,
                f = entry.f,
                g,
                h,
                frontier = frontier.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "A* progress"
            );
        }

        for successor in board.successors() {
            if closed.contains(&successor.board) {
                continue;
            }
            let next_g = g + 1;
            if best_g.get(&successor.board).is_some_and(|&known| known <= next_g) {
                continue;
            }
            best_g.insert(successor.board, next_g);

            let next_h = estimate(&successor.board);
            arena.push(Node {
                board: successor.board,
                g: next_g,
                h: next_h,
                parent: Some(entry.node),
                mv: Some(successor.mv),
            });
            frontier.push(FrontierEntry {
                f: config.priority(next_g, next_h),
                g: next_g,
                node: arena.len() - 1,
            });
            stats.generated += 1;
        }
    }

    stats.elapsed = started.elapsed();
    info!(expanded = stats.expanded, "frontier exhausted, goal unreachable");
    Ok(SearchReport {
        outcome: SearchOutcome::Unsolvable,
        stats,
    })
}

/// Breadth-first search over the same move generator.
///
/// Returns a shortest solution in number of moves. Far slower than A* on
/// anything but small boards; it exists as a reference answer.
/// `max_states` caps the number of expanded boards; on exhaustion the partial
/// path leads to the board that was about to be expanded.
pub fn solve_bfs(puzzle: &Puzzle, max_states: Option<usize>) -> SearchReport {
    let started = Instant::now();
    let mut stats = SearchStats::default();

    let start = *puzzle.start();
    if puzzle.is_solved(&start) {
        stats.elapsed = started.elapsed();
        return SearchReport {
            outcome: SearchOutcome::Solved(Vec::new()),
            stats,
        };
    }

    let mut arena = vec![Node {
        board: start,
        g: 0,
        h: 0,
        parent: None,
        mv: None,
    }];
    let mut visited: FxHashSet<Board> = FxHashSet::default();
    visited.insert(start);
    let mut queue = VecDeque::from([0usize]);

    while let Some(index) = queue.pop_front() {
        if max_states.is_some_and(|cap| stats.expanded >= cap) {
            stats.elapsed = started.elapsed();
            warn!(expanded = stats.expanded, "BFS state budget exhausted");
            return SearchReport {
                outcome: SearchOutcome::BudgetExhausted {
                    partial: reconstruct_path(&arena, index),
                    kind: BudgetKind::Expansions,
                },
                stats,
            };
        }
        stats.expanded += 1;

        let Node { board, g, .. } = arena[index];
        for successor in board.successors() {
            if !visited.insert(successor.board) {
                continue;
            }
            arena.push(Node {
                board: successor.board,
                g: g + 1,
                h: 0,
                parent: Some(index),
                mv: Some(successor.mv),
            });
            stats.generated += 1;
            let child = arena.len() - 1;

            if puzzle.is_solved(&successor.board) {
                stats.elapsed = started.elapsed();
                let moves = reconstruct_path(&arena, child);
                info!(moves = moves.len(), expanded = stats.expanded, "BFS reached the goal");
                return SearchReport {
                    outcome: SearchOutcome::Solved(moves),
                    stats,
                };
            }
            queue.push_back(child);
        }
    }

    stats.elapsed = started.elapsed();
    SearchReport {
        outcome: SearchOutcome::Unsolvable,
        stats,
    }
}
