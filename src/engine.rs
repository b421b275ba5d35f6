//! Core game engine for the corners-swap puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Color`, `Cell`: the two piece colors and grid coordinates.
//! - `Board`: an immutable-by-convention snapshot of the grid, stored as one
//!   occupancy bitmask per color, plus the move generator (`Board::successors`).
//! - `CornerLayout`: the standard start/goal pair built from corner blocks.
//! - `Puzzle`: a validated start/goal pair, with replay and seeded scrambles.
use crate::error::{PuzzleError, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use std::fmt;

/// Largest supported board side. Each color must fit in one `u64` mask.
pub const MAX_BOARD_SIZE: usize = 8;

/// Up, down, left, right. Move generation order follows this table.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The two piece colors.
///
/// White starts in the top-left corner and Black in the bottom-right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Converts the color to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use corners_solver::engine::Color;
    /// assert_eq!(Color::White.to_char(), 'W');
    /// assert_eq!(Color::Black.to_char(), 'B');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

/// A grid coordinate, 0-based, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// How a piece got from its source to its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// One cell to an orthogonally adjacent empty cell.
    Step,
    /// The net result of a chain of one or more jumps.
    Jump,
}

/// A relocation of one piece. Jump chains are recorded only by their
/// originating source and final landing cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub from: Cell,
    pub to: Cell,
    pub kind: MoveKind,
}

/// A board reachable in one move, together with the move that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Successor {
    pub board: Board,
    pub mv: Move,
}

/// Represents an N×N board as two disjoint occupancy masks.
///
/// Bit `row * size + col` of `white` (or `black`) is set when that cell holds a
/// piece of the color. The masks never overlap and never have bits outside the
/// grid; every constructor enforces this.
///
/// Boards are `Copy` values. Operations that relocate a piece return a new
/// board and leave the receiver untouched, so a board stored in a search node
/// never changes after it is published. Equality and hashing use the masks
/// directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    white: u64,
    black: u64,
}

impl Board {
    /// Creates an empty `size`×`size` board.
    ///
    /// # Errors
    /// `EmptyBoard` for size 0, `BoardTooLarge` above [`MAX_BOARD_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use corners_solver::engine::{Board, Cell};
    /// let board = Board::new_empty(4).unwrap();
    /// assert_eq!(board.size(), 4);
    /// assert!(!board.is_occupied(Cell::new(0, 0)));
    /// ```
    pub fn new_empty(size: usize) -> Result<Self> {
        validate_size(size)?;
        Ok(Board {
            size: size as u8,
            white: 0,
            black: 0,
        })
    }

    /// Creates a board from raw occupancy masks.
    ///
    /// # Errors
    /// Size errors as in [`Board::new_empty`], `OverlappingPieces` when the two
    /// masks share a bit, and `CellOutOfBounds` for a bit beyond the grid.
    pub fn from_masks(size: usize, white: u64, black: u64) -> Result<Self> {
        validate_size(size)?;
        let overlap = white & black;
        if overlap != 0 {
            return Err(PuzzleError::OverlappingPieces { overlap });
        }
        let outside = (white | black) & !grid_mask(size);
        if outside != 0 {
            let index = outside.trailing_zeros() as usize;
            return Err(PuzzleError::CellOutOfBounds {
                row: index / size,
                col: index % size,
                size,
            });
        }
        Ok(Board {
            size: size as u8,
            white,
            black,
        })
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Occupancy mask of one color.
    pub fn mask(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Occupancy mask of both colors.
    pub fn occupied(&self) -> u64 {
        self.white | self.black
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size() && cell.col < self.size()
    }

    fn bit(&self, cell: Cell) -> u64 {
        1u64 << (cell.row * self.size() + cell.col)
    }

    /// Returns the color of the piece on `cell`, or `None` when the cell is
    /// empty or off the board.
    pub fn piece_at(&self, cell: Cell) -> Option<Color> {
        if !self.contains(cell) {
            return None;
        }
        let bit = self.bit(cell);
        if self.white & bit != 0 {
            Some(Color::White)
        } else if self.black & bit != 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.piece_at(cell).is_some()
    }

    /// Places a piece on (or clears) a cell of this board value.
    ///
    /// Used while building boards from layouts or text; the search itself
    /// only ever derives new boards by relocating pieces.
    ///
    /// # Errors
    /// `CellOutOfBounds` if `cell` is off the board.
    pub fn set_piece(&mut self, cell: Cell, piece: Option<Color>) -> Result<()> {
        if !self.contains(cell) {
            return Err(PuzzleError::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                size: self.size(),
            });
        }
        let bit = self.bit(cell);
        self.white &= !bit;
        self.black &= !bit;
        match piece {
            Some(Color::White) => self.white |= bit,
            Some(Color::Black) => self.black |= bit,
            None => {}
        }
        Ok(())
    }

    /// Returns a new board with the `color` piece on `from` relocated to `to`.
    ///
    /// Exactly one of the two masks changes and the receiver is left as is.
    /// Only occupancy is checked here; whether `to` is reachable in one move
    /// is up to [`Board::successors`].
    ///
    /// # Errors
    /// `InvalidRelocation` if `from` does not hold a `color` piece or `to` is
    /// off the board or occupied.
    pub fn move_piece(&self, from: Cell, to: Cell, color: Color) -> Result<Board> {
        let invalid = |reason| PuzzleError::InvalidRelocation {
            color,
            from,
            to,
            reason,
        };
        if !self.contains(from) || self.piece_at(from) != Some(color) {
            return Err(invalid("no piece of that color on the source cell"));
        }
        if !self.contains(to) || self.is_occupied(to) {
            return Err(invalid("destination is off the board or occupied"));
        }
        Ok(self.relocate(from, to, color))
    }

    /// Unchecked [`Board::move_piece`] for moves the generator already knows
    /// to be legal.
    pub(crate) fn relocate(&self, from: Cell, to: Cell, color: Color) -> Board {
        debug_assert_eq!(self.piece_at(from), Some(color));
        debug_assert!(self.contains(to) && !self.is_occupied(to));
        let delta = self.bit(from) | self.bit(to);
        let mut next = *self;
        match color {
            Color::White => next.white ^= delta,
            Color::Black => next.black ^= delta,
        }
        next
    }

    /// Number of pieces of one color.
    pub fn count(&self, color: Color) -> usize {
        self.mask(color).count_ones() as usize
    }

    /// Cells holding `color` pieces, in row-major order.
    pub fn cells(&self, color: Color) -> impl Iterator<Item = Cell> {
        CellIter {
            mask: self.mask(color),
            size: self.size(),
        }
    }

    /// The neighbor `distance` cells away in direction `(dr, dc)`, if on the board.
    fn offset(&self, cell: Cell, (dr, dc): (isize, isize), distance: isize) -> Option<Cell> {
        let row = cell.row as isize + dr * distance;
        let col = cell.col as isize + dc * distance;
        let size = self.size() as isize;
        if row < 0 || col < 0 || row >= size || col >= size {
            None
        } else {
            Some(Cell::new(row as usize, col as usize))
        }
    }

    /// Enumerates every board reachable in one move.
    ///
    /// For each piece, in row-major order:
    /// 1. a `Step` to every orthogonally adjacent empty cell (up, down, left, right);
    /// 2. a `Jump` to every cell the piece can finish on after a chain of one or
    ///    more jumps, where each jump passes over an occupied neighbor (either
    ///    color) onto the empty cell directly beyond it.
    ///
    /// The piece may stop after any leg of a chain, so every landing cell of
    /// every chain yields its own move. Only the net source/landing pair is
    /// recorded. Successors that produce an identical board are collapsed,
    /// keeping the first move label generated.
    ///
    /// # Examples
    /// ```
    /// use corners_solver::engine::{Board, Cell, Color, MoveKind};
    /// let mut board = Board::new_empty(3).unwrap();
    /// board.set_piece(Cell::new(0, 0), Some(Color::White)).unwrap();
    /// board.set_piece(Cell::new(0, 1), Some(Color::Black)).unwrap();
    ///
    /// let white_jumps: Vec<Cell> = board
    ///     .successors()
    ///     .into_iter()
    ///     .filter(|s| s.mv.color == Color::White && s.mv.kind == MoveKind::Jump)
    ///     .map(|s| s.mv.to)
    ///     .collect();
    /// assert_eq!(white_jumps, vec![Cell::new(0, 2)]);
    /// ```
    pub fn successors(&self) -> Vec<Successor> {
        let mut successors = Vec::new();
        let mut seen: FxHashSet<Board> = FxHashSet::default();

        for from in (CellIter {
            mask: self.occupied(),
            size: self.size(),
        }) {
            let Some(color) = self.piece_at(from) else {
                continue;
            };

            for direction in DIRECTIONS {
                if let Some(to) = self.offset(from, direction, 1) {
                    if !self.is_occupied(to) {
                        self.push_successor(&mut successors, &mut seen, color, from, to, MoveKind::Step);
                    }
                }
            }

            for to in self.jump_landings(from) {
                self.push_successor(&mut successors, &mut seen, color, from, to, MoveKind::Jump);
            }
        }

        successors
    }

    fn push_successor(
        &self,
        successors: &mut Vec<Successor>,
        seen: &mut FxHashSet<Board>,
        color: Color,
        from: Cell,
        to: Cell,
        kind: MoveKind,
    ) {
        let board = self.relocate(from, to, color);
        if seen.insert(board) {
            successors.push(Successor {
                board,
                mv: Move {
                    color,
                    from,
                    to,
                    kind,
                },
            });
        }
    }

    /// Every cell the piece on `from` can finish a jump chain on.
    ///
    /// The mover is lifted off the board for the whole chain, so the cells it
    /// may jump over and land on depend only on the other pieces. Chain
    /// endpoints are then exactly the cells reachable in that fixed jump graph,
    /// and one visited mask per piece (seeded with the origin) both stops
    /// cycles and deduplicates landings reached along different paths.
    fn jump_landings(&self, from: Cell) -> Vec<Cell> {
        let others = self.occupied() & !self.bit(from);
        let mut visited = self.bit(from);
        let mut stack = vec![from];
        let mut landings = Vec::new();

        while let Some(pos) = stack.pop() {
            for direction in DIRECTIONS {
                let (Some(over), Some(land)) =
                    (self.offset(pos, direction, 1), self.offset(pos, direction, 2))
                else {
                    continue;
                };
                let land_bit = self.bit(land);
                if others & self.bit(over) != 0 && others & land_bit == 0 && visited & land_bit == 0 {
                    visited |= land_bit;
                    landings.push(land);
                    stack.push(land);
                }
            }
        }

        landings
    }
}

impl fmt::Display for Board {
    /// Column letters across the top, 1-based row numbers down the side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..self.size() {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        for row in 0..self.size() {
            write!(f, "\n{}", row + 1)?;
            for col in 0..self.size() {
                let symbol = self
                    .piece_at(Cell::new(row, col))
                    .map_or('.', Color::to_char);
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}

/// Iterates the set bits of a mask as cells, lowest index first.
struct CellIter {
    mask: u64,
    size: usize,
}

impl Iterator for CellIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.mask == 0 {
            return None;
        }
        let index = self.mask.trailing_zeros() as usize;
        self.mask &= self.mask - 1;
        Some(Cell::new(index / self.size, index % self.size))
    }
}

fn validate_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(PuzzleError::EmptyBoard);
    }
    if size > MAX_BOARD_SIZE {
        return Err(PuzzleError::BoardTooLarge { size });
    }
    Ok(())
}

fn grid_mask(size: usize) -> u64 {
    let cells = size * size;
    if cells >= 64 {
        u64::MAX
    } else {
        (1u64 << cells) - 1
    }
}

/// The standard puzzle: two `block_rows`×`block_cols` corner blocks.
///
/// White fills the top-left block and Black the mirrored bottom-right block.
/// The goal swaps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerLayout {
    pub size: usize,
    pub block_rows: usize,
    pub block_cols: usize,
}

impl Default for CornerLayout {
    fn default() -> Self {
        CornerLayout {
            size: MAX_BOARD_SIZE,
            block_rows: 2,
            block_cols: 2,
        }
    }
}

impl CornerLayout {
    pub fn new(size: usize, block_rows: usize, block_cols: usize) -> Self {
        CornerLayout {
            size,
            block_rows,
            block_cols,
        }
    }

    /// Checks the board size and that both blocks fit without overlapping.
    ///
    /// A zero-sized block is accepted; its start and goal are the same board.
    pub fn validate(&self) -> Result<()> {
        validate_size(self.size)?;
        let CornerLayout {
            size,
            block_rows: rows,
            block_cols: cols,
        } = *self;
        if rows > size || cols > size {
            return Err(PuzzleError::BlockOutOfBounds { rows, cols, size });
        }
        if 2 * rows > size && 2 * cols > size {
            return Err(PuzzleError::BlocksOverlap { rows, cols, size });
        }
        Ok(())
    }

    fn top_left_block(&self) -> u64 {
        let mut mask = 0;
        for row in 0..self.block_rows {
            for col in 0..self.block_cols {
                mask |= 1u64 << (row * self.size + col);
            }
        }
        mask
    }

    fn bottom_right_block(&self) -> u64 {
        let mut mask = 0;
        for row in self.size - self.block_rows..self.size {
            for col in self.size - self.block_cols..self.size {
                mask |= 1u64 << (row * self.size + col);
            }
        }
        mask
    }

    /// White in the top-left block, Black in the bottom-right block.
    pub fn start(&self) -> Result<Board> {
        self.validate()?;
        Board::from_masks(self.size, self.top_left_block(), self.bottom_right_block())
    }

    /// The start with the two blocks exchanged.
    pub fn goal(&self) -> Result<Board> {
        self.validate()?;
        Board::from_masks(self.size, self.bottom_right_block(), self.top_left_block())
    }
}

/// A validated start/goal pair.
///
/// Both boards have the same size and each color has the same number of
/// pieces in both, so the goal is at least not ruled out by counting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    start: Board,
    goal: Board,
}

impl Puzzle {
    /// Builds the corner-swap puzzle for `layout`.
    ///
    /// # Examples
    /// ```
    /// use corners_solver::engine::{Color, CornerLayout, Puzzle};
    /// let puzzle = Puzzle::new(CornerLayout::new(8, 3, 3)).unwrap();
    /// assert_eq!(puzzle.start().count(Color::White), 9);
    /// assert_eq!(puzzle.goal().count(Color::Black), 9);
    ///
    /// assert!(Puzzle::new(CornerLayout::new(4, 3, 3)).is_err());
    /// ```
    pub fn new(layout: CornerLayout) -> Result<Self> {
        Ok(Puzzle {
            start: layout.start()?,
            goal: layout.goal()?,
        })
    }

    /// Builds a puzzle from an arbitrary start and goal.
    ///
    /// # Errors
    /// `SizeMismatch` if the boards differ in size, `PieceCountMismatch` if a
    /// color has a different number of pieces in the two boards.
    pub fn from_boards(start: Board, goal: Board) -> Result<Self> {
        if start.size() != goal.size() {
            return Err(PuzzleError::SizeMismatch {
                start: start.size(),
                goal: goal.size(),
            });
        }
        for color in Color::ALL {
            if start.count(color) != goal.count(color) {
                return Err(PuzzleError::PieceCountMismatch {
                    color,
                    start: start.count(color),
                    goal: goal.count(color),
                });
            }
        }
        Ok(Puzzle { start, goal })
    }

    /// Builds a puzzle whose start is a seeded random walk of `walk_len` moves
    /// away from the layout's goal.
    ///
    /// Every step and jump chain can be undone by the reverse move, so the
    /// shortest solution is at most `walk_len` moves long. The same seed always
    /// produces the same start.
    pub fn scrambled(layout: CornerLayout, walk_len: usize, seed: u64) -> Result<Self> {
        let goal = layout.goal()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = goal;
        for _ in 0..walk_len {
            let successors = board.successors();
            if successors.is_empty() {
                break;
            }
            board = successors[rng.gen_range(0..successors.len())].board;
        }
        Puzzle::from_boards(board, goal)
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn is_solved(&self, board: &Board) -> bool {
        *board == self.goal
    }

    /// Applies `moves` in order to the start board and returns the result.
    ///
    /// Each move must name an existing piece of its color, and the resulting
    /// board must be one of the current board's successors.
    ///
    /// # Errors
    /// `IllegalMove` with the index of the first move that fails.
    pub fn replay(&self, moves: &[Move]) -> Result<Board> {
        let mut board = self.start;
        for (index, mv) in moves.iter().enumerate() {
            let illegal = |reason| PuzzleError::IllegalMove {
                index,
                color: mv.color,
                from: mv.from,
                to: mv.to,
                reason,
            };
            let next = board
                .move_piece(mv.from, mv.to, mv.color)
                .map_err(|err| match err {
                    PuzzleError::InvalidRelocation { reason, .. } => illegal(reason),
                    other => other,
                })?;
            if !board.successors().iter().any(|s| s.board == next) {
                return Err(illegal("destination is not reachable in one move"));
            }
            board = next;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn jumps_of(board: &Board, from: Cell) -> Vec<Cell> {
        let mut cells: Vec<Cell> = board
            .successors()
            .into_iter()
            .filter(|s| s.mv.from == from && s.mv.kind == MoveKind::Jump)
            .map(|s| s.mv.to)
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_new_empty_board_sizes() {
        assert!(Board::new_empty(1).is_ok());
        assert!(Board::new_empty(MAX_BOARD_SIZE).is_ok());
        assert_eq!(Board::new_empty(0), Err(PuzzleError::EmptyBoard));
        assert_eq!(
            Board::new_empty(9),
            Err(PuzzleError::BoardTooLarge { size: 9 })
        );
    }

    #[test]
    fn test_from_masks_rejects_invalid_masks() {
        assert!(matches!(
            Board::from_masks(4, 0b11, 0b10),
            Err(PuzzleError::OverlappingPieces { overlap: 0b10 })
        ));
        assert_eq!(
            Board::from_masks(2, 1 << 4, 0),
            Err(PuzzleError::CellOutOfBounds {
                row: 2,
                col: 0,
                size: 2
            })
        );
        let full = Board::from_masks(8, u64::MAX, 0).unwrap();
        assert_eq!(full.count(Color::White), 64);
    }

    #[test]
    fn test_layout_start_and_goal() {
        let layout = CornerLayout::new(4, 2, 2);
        let start = layout.start().unwrap();
        let goal = layout.goal().unwrap();

        assert_eq!(start.piece_at(Cell::new(0, 0)), Some(Color::White));
        assert_eq!(start.piece_at(Cell::new(1, 1)), Some(Color::White));
        assert_eq!(start.piece_at(Cell::new(3, 3)), Some(Color::Black));
        assert_eq!(start.piece_at(Cell::new(2, 2)), Some(Color::Black));
        assert_eq!(start.piece_at(Cell::new(0, 3)), None);

        assert_eq!(goal.mask(Color::White), start.mask(Color::Black));
        assert_eq!(goal.mask(Color::Black), start.mask(Color::White));
        for color in Color::ALL {
            assert_eq!(start.count(color), 4);
            assert_eq!(goal.count(color), 4);
        }
    }

    #[test]
    fn test_layout_validation() {
        assert_eq!(
            CornerLayout::new(4, 5, 1).validate(),
            Err(PuzzleError::BlockOutOfBounds {
                rows: 5,
                cols: 1,
                size: 4
            })
        );
        assert_eq!(
            CornerLayout::new(5, 3, 3).validate(),
            Err(PuzzleError::BlocksOverlap {
                rows: 3,
                cols: 3,
                size: 5
            })
        );
        // Tall but narrow blocks share no cell.
        assert!(CornerLayout::new(4, 4, 2).validate().is_ok());
        assert!(CornerLayout::new(9, 1, 1).validate().is_err());
    }

    #[test]
    fn test_zero_block_layout_is_already_solved() {
        let puzzle = Puzzle::new(CornerLayout::new(4, 0, 0)).unwrap();
        assert!(puzzle.is_solved(puzzle.start()));
        assert_eq!(puzzle.start().occupied(), 0);
    }

    #[test]
    fn test_move_piece_returns_new_board() {
        let board = CornerLayout::new(4, 1, 1).start().unwrap();
        let moved = board
            .move_piece(Cell::new(0, 0), Cell::new(0, 1), Color::White)
            .unwrap();

        assert_eq!(board.piece_at(Cell::new(0, 0)), Some(Color::White));
        assert_eq!(moved.piece_at(Cell::new(0, 0)), None);
        assert_eq!(moved.piece_at(Cell::new(0, 1)), Some(Color::White));
        assert_eq!(moved.mask(Color::Black), board.mask(Color::Black));
    }

    #[test]
    fn test_move_piece_rejects_bad_source_or_destination() {
        let board = CornerLayout::new(4, 1, 1).start().unwrap();
        let rejected = |from, to, color| {
            matches!(
                board.move_piece(from, to, color),
                Err(PuzzleError::InvalidRelocation { .. })
            )
        };

        // Empty source: an unchecked update would conjure a second white piece.
        assert!(rejected(Cell::new(1, 1), Cell::new(0, 1), Color::White));
        // Source holds the other color.
        assert!(rejected(Cell::new(3, 3), Cell::new(3, 2), Color::White));
        // Destination holds a piece: white would share the black cell.
        assert!(rejected(Cell::new(0, 0), Cell::new(3, 3), Color::White));
        // Off the board on either end.
        assert!(rejected(Cell::new(0, 0), Cell::new(0, 4), Color::White));
        assert!(rejected(Cell::new(4, 0), Cell::new(0, 1), Color::White));

        assert_eq!(board.count(Color::White), 1);
        assert_eq!(board.occupied().count_ones(), 2);
    }

    #[test]
    fn test_cells_are_row_major() {
        let board = board_from_str_array(&["..W", "W..", ".W."]).unwrap();
        let cells: Vec<Cell> = board.cells(Color::White).collect();
        assert_eq!(cells, vec![Cell::new(0, 2), Cell::new(1, 0), Cell::new(2, 1)]);
        assert_eq!(board.cells(Color::Black).count(), 0);
    }

    #[test]
    fn test_isolated_piece_only_steps() {
        let board = board_from_str_array(&["...", ".W.", "..."]).unwrap();
        let successors = board.successors();
        assert_eq!(successors.len(), 4);
        assert!(successors.iter().all(|s| s.mv.kind == MoveKind::Step));
        let targets: Vec<Cell> = successors.iter().map(|s| s.mv.to).collect();
        assert_eq!(
            targets,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_corner_piece_steps_stay_on_board() {
        let board = board_from_str_array(&["W..", "...", "..."]).unwrap();
        let targets: Vec<Cell> = board.successors().iter().map(|s| s.mv.to).collect();
        assert_eq!(targets, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn test_jump_over_either_color() {
        let board = board_from_str_array(&["WWB..", ".....", "....."]).unwrap();
        // The left white piece jumps its neighbor; the middle one jumps black.
        assert_eq!(jumps_of(&board, Cell::new(0, 0)), Vec::<Cell>::new());
        assert_eq!(jumps_of(&board, Cell::new(0, 1)), vec![Cell::new(0, 3)]);
        assert_eq!(jumps_of(&board, Cell::new(0, 2)), Vec::<Cell>::new());
    }

    #[test]
    fn test_jump_needs_empty_landing_on_board() {
        let board = board_from_str_array(&["WBB", "...", "..."]).unwrap();
        assert!(jumps_of(&board, Cell::new(0, 0)).is_empty());
        let edge = board_from_str_array(&[".WB", "...", "..."]).unwrap();
        assert!(jumps_of(&edge, Cell::new(0, 1)).is_empty());
    }

    #[test]
    fn test_jump_chain_emits_every_landing() {
        let board = board_from_str_array(&[
            "WB...",
            "..B..",
            ".....",
            ".....",
            ".....",
        ])
        .unwrap();
        assert_eq!(
            jumps_of(&board, Cell::new(0, 0)),
            vec![Cell::new(0, 2), Cell::new(2, 2)]
        );
        let white_steps: Vec<Cell> = board
            .successors()
            .into_iter()
            .filter(|s| s.mv.color == Color::White && s.mv.kind == MoveKind::Step)
            .map(|s| s.mv.to)
            .collect();
        assert_eq!(white_steps, vec![Cell::new(1, 0)]);
    }

    #[test]
    fn test_jump_chain_never_returns_to_origin() {
        // After jumping right the piece could jump straight back over the
        // same black piece; the origin is excluded from the chain.
        let board = board_from_str_array(&["WB.", "...", "..."]).unwrap();
        assert_eq!(jumps_of(&board, Cell::new(0, 0)), vec![Cell::new(0, 2)]);
    }

    #[test]
    fn test_jump_chain_around_a_loop_lands_once_per_cell() {
        // (2, 2) is reachable through (0, 2) and through (2, 0).
        let board = board_from_str_array(&[
            "WB...",
            "B.B..",
            ".B...",
            ".....",
            ".....",
        ])
        .unwrap();
        assert_eq!(
            jumps_of(&board, Cell::new(0, 0)),
            vec![Cell::new(0, 2), Cell::new(2, 0), Cell::new(2, 2)]
        );

        let ring = board_from_str_array(&[
            ".....",
            ".B.B.",
            "..W..",
            ".B.B.",
            ".....",
        ])
        .unwrap();
        // Diagonal neighbors cannot be jumped.
        assert!(jumps_of(&ring, Cell::new(2, 2)).is_empty());

        let cross = board_from_str_array(&[
            "..W..",
            "..B..",
            ".B.B.",
            "..B..",
            ".....",
        ])
        .unwrap();
        assert_eq!(
            jumps_of(&cross, Cell::new(0, 2)),
            vec![
                Cell::new(2, 0),
                Cell::new(2, 2),
                Cell::new(2, 4),
                Cell::new(4, 2)
            ]
        );
    }

    #[test]
    fn test_successors_are_unique_and_conserve_pieces() {
        for seed in 0..8 {
            let puzzle = Puzzle::scrambled(CornerLayout::new(6, 3, 2), 12, seed).unwrap();
            let board = *puzzle.start();
            let successors = board.successors();
            assert!(!successors.is_empty());

            let mut seen = FxHashSet::default();
            for successor in &successors {
                assert!(seen.insert(successor.board), "duplicate successor board");
                assert_ne!(successor.board, board);
                for color in Color::ALL {
                    assert_eq!(successor.board.count(color), board.count(color));
                }
                assert_eq!(successor.board.mask(Color::White) & successor.board.mask(Color::Black), 0);
                assert_eq!(
                    successor.board,
                    board
                        .move_piece(successor.mv.from, successor.mv.to, successor.mv.color)
                        .unwrap()
                );
            }
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["W..", "...", "..B"]).unwrap();
        assert_eq!(board.to_string(), "  A B C\n1 W . .\n2 . . .\n3 . . B");
    }

    #[test]
    fn test_from_boards_validation() {
        let four = CornerLayout::new(4, 1, 1);
        let five = CornerLayout::new(5, 1, 1);
        assert_eq!(
            Puzzle::from_boards(four.start().unwrap(), five.goal().unwrap()),
            Err(PuzzleError::SizeMismatch { start: 4, goal: 5 })
        );

        let uneven = board_from_str_array(&["WW..", "....", "....", "...B"]).unwrap();
        assert_eq!(
            Puzzle::from_boards(uneven, four.goal().unwrap()),
            Err(PuzzleError::PieceCountMismatch {
                color: Color::White,
                start: 2,
                goal: 1
            })
        );
    }

    #[test]
    fn test_scrambled_is_deterministic_and_bounded() {
        let layout = CornerLayout::new(5, 2, 2);
        let a = Puzzle::scrambled(layout, 10, 7).unwrap();
        let b = Puzzle::scrambled(layout, 10, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.goal(), &layout.goal().unwrap());

        let untouched = Puzzle::scrambled(layout, 0, 7).unwrap();
        assert!(untouched.is_solved(untouched.start()));
    }

    #[test]
    fn test_replay_accepts_legal_moves() {
        let puzzle = Puzzle::new(CornerLayout::new(3, 1, 1)).unwrap();
        let moves = [
            Move {
                color: Color::White,
                from: Cell::new(0, 0),
                to: Cell::new(0, 1),
                kind: MoveKind::Step,
            },
            Move {
                color: Color::Black,
                from: Cell::new(2, 2),
                to: Cell::new(1, 2),
                kind: MoveKind::Step,
            },
        ];
        let board = puzzle.replay(&moves).unwrap();
        assert_eq!(board.piece_at(Cell::new(0, 1)), Some(Color::White));
        assert_eq!(board.piece_at(Cell::new(1, 2)), Some(Color::Black));
    }

    #[test]
    fn test_replay_rejects_illegal_moves() {
        let puzzle = Puzzle::new(CornerLayout::new(4, 1, 1)).unwrap();
        let wrong_color = Move {
            color: Color::Black,
            from: Cell::new(0, 0),
            to: Cell::new(0, 1),
            kind: MoveKind::Step,
        };
        assert!(matches!(
            puzzle.replay(&[wrong_color]),
            Err(PuzzleError::IllegalMove { index: 0, .. })
        ));

        let teleport = Move {
            color: Color::White,
            from: Cell::new(0, 0),
            to: Cell::new(2, 2),
            kind: MoveKind::Jump,
        };
        assert!(matches!(
            puzzle.replay(&[teleport]),
            Err(PuzzleError::IllegalMove { index: 0, .. })
        ));
    }
}
