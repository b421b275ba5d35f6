//! Lower-bound estimates of the number of moves left to reach the goal.
//!
//! The main estimate solves, for each color, the assignment problem between
//! the cells the color occupies now and its goal cells, with (scaled)
//! Manhattan distances as costs. A weaker per-piece nearest-goal sum is kept
//! as a baseline for comparison.
use crate::engine::{Board, Cell, Color};

/// Maps a Manhattan distance to the move cost charged for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DistanceScale {
    /// One move per unit of distance. Overestimates as soon as a jump is the
    /// best way forward, so it is not admissible.
    Steps,
    /// `ceil(d / 2)`: a step covers distance 1 and a single jump covers 2.
    ///
    /// This never overestimates as long as no move carries a piece further
    /// than distance 2. A multi-leg jump chain can, so on crowded boards the
    /// value is an estimate rather than a strict bound. With one piece per
    /// color chains never exceed one leg and the bound is exact in that sense.
    #[default]
    Halved,
    /// `min(d, 1)`: one move for every piece not yet on a goal cell.
    ///
    /// A move relocates a single piece, however long its jump chain, so this
    /// never overestimates. With it, A* at weight 1 returns shortest paths.
    Moved,
}

impl DistanceScale {
    pub fn apply(self, distance: u32) -> u32 {
        match self {
            DistanceScale::Steps => distance,
            DistanceScale::Halved => (distance + 1) / 2,
            DistanceScale::Moved => distance.min(1),
        }
    }
}

/// Which estimate the search uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeuristicKind {
    /// Minimum-cost matching per color, see [`assignment_heuristic`].
    #[default]
    Assignment,
    /// Sum of each piece's distance to its nearest goal cell.
    NearestGoal,
}

impl HeuristicKind {
    pub fn estimate(self, board: &Board, goals: &GoalCells, scale: DistanceScale) -> u32 {
        match self {
            HeuristicKind::Assignment => assignment_heuristic(board, goals, scale),
            HeuristicKind::NearestGoal => nearest_goal_heuristic(board, goals, scale),
        }
    }
}

/// Goal cells of each color, extracted once per search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalCells {
    white: Vec<Cell>,
    black: Vec<Cell>,
}

impl GoalCells {
    pub fn from_board(goal: &Board) -> Self {
        GoalCells {
            white: goal.cells(Color::White).collect(),
            black: goal.cells(Color::Black).collect(),
        }
    }

    pub fn of(&self, color: Color) -> &[Cell] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

pub fn manhattan_distance(a: Cell, b: Cell) -> u32 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as u32
}

/// Result of [`min_cost_assignment`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Sum of the matched costs.
    pub total: u64,
    /// `pairs[row]` is the column matched to `row`, or `None` when the row
    /// was matched to a padding column.
    pub pairs: Vec<Option<usize>>,
}

/// Solves the assignment problem for a non-negative integer cost matrix.
///
/// Rectangular (and ragged) input is padded to a square matrix with zero-cost
/// dummy entries, so every real row is matched to at most one real column and
/// vice versa. Runs the shortest augmenting path form of the Hungarian method
/// with row potentials `u` and column potentials `v`, O(n³).
///
/// # Examples
/// ```
/// use corners_solver::heuristics::min_cost_assignment;
/// let costs = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
/// let assignment = min_cost_assignment(&costs);
/// assert_eq!(assignment.total, 5);
/// assert_eq!(assignment.pairs, vec![Some(1), Some(0), Some(2)]);
///
/// assert_eq!(min_cost_assignment(&[]).total, 0);
/// ```
pub fn min_cost_assignment(costs: &[Vec<u32>]) -> Assignment {
    let rows = costs.len();
    let cols = costs.iter().map(Vec::len).max().unwrap_or(0);
    let n = rows.max(cols);
    if n == 0 {
        return Assignment {
            total: 0,
            pairs: Vec::new(),
        };
    }

    let cost = |i: usize, j: usize| -> i64 {
        costs
            .get(i)
            .and_then(|row| row.get(j))
            .map_or(0, |&c| i64::from(c))
    };

    let inf = i64::MAX / 4;
    // 1-based; index 0 of `p` is the row currently being inserted.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![inf; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = inf;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            // Reduced costs stay non-negative: tight edges on the tree keep
            // u + v == cost, everything else only shrinks its slack.
            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut pairs = vec![None; rows];
    let mut total = 0u64;
    for j in 1..=n {
        let i = p[j];
        if i == 0 || i > rows {
            continue;
        }
        if let Some(&c) = costs[i - 1].get(j - 1) {
            pairs[i - 1] = Some(j - 1);
            total += u64::from(c);
        }
    }

    Assignment { total, pairs }
}

fn color_matching_cost(board: &Board, goals: &GoalCells, color: Color, scale: DistanceScale) -> u32 {
    let targets = goals.of(color);
    let costs: Vec<Vec<u32>> = board
        .cells(color)
        .map(|cell| {
            targets
                .iter()
                .map(|&target| scale.apply(manhattan_distance(cell, target)))
                .collect()
        })
        .collect();
    min_cost_assignment(&costs).total as u32
}

/// Sum over both colors of the minimum-cost matching between current and
/// goal cells.
///
/// Zero exactly when every piece sits on a goal cell of its own color, i.e.
/// when the board equals the goal (piece counts match by construction of
/// [`crate::engine::Puzzle`]). Unlike the nearest-goal sum it charges for two
/// pieces competing for the same target.
pub fn assignment_heuristic(board: &Board, goals: &GoalCells, scale: DistanceScale) -> u32 {
    Color::ALL
        .iter()
        .map(|&color| color_matching_cost(board, goals, color, scale))
        .sum()
}

/// Sum of each piece's scaled distance to the closest goal cell of its color.
///
/// Never larger than [`assignment_heuristic`]: every matching pays at least
/// the nearest-goal distance for each piece.
pub fn nearest_goal_heuristic(board: &Board, goals: &GoalCells, scale: DistanceScale) -> u32 {
    let mut total = 0;
    for color in Color::ALL {
        let targets = goals.of(color);
        for cell in board.cells(color) {
            total += targets
                .iter()
                .map(|&target| scale.apply(manhattan_distance(cell, target)))
                .min()
                .unwrap_or(0);
        }
    }
    total
}
