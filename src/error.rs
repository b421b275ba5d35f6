//! Error types for the corners solver.
//!
//! Only construction, checked moves and replay can fail. A search that runs out of states or
//! budget reports that through [`crate::solver::SearchOutcome`] instead.

use thiserror::Error;

use crate::engine::{Cell, Color, MAX_BOARD_SIZE};

/// Main error type for the corners solver crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("board size {size} exceeds the maximum of {max}", max = MAX_BOARD_SIZE)]
    BoardTooLarge { size: usize },

    #[error("board size must be at least 1")]
    EmptyBoard,

    #[error("corner block {rows}x{cols} does not fit on a {size}x{size} board")]
    BlockOutOfBounds { rows: usize, cols: usize, size: usize },

    #[error("corner blocks {rows}x{cols} overlap on a {size}x{size} board")]
    BlocksOverlap { rows: usize, cols: usize, size: usize },

    #[error("white and black pieces share cells (mask {overlap:#x})")]
    OverlappingPieces { overlap: u64 },

    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    CellOutOfBounds { row: usize, col: usize, size: usize },

    #[error("start board is {start}x{start} but goal board is {goal}x{goal}")]
    SizeMismatch { start: usize, goal: usize },

    #[error("{color:?} has {start} pieces at the start but {goal} in the goal")]
    PieceCountMismatch {
        color: Color,
        start: usize,
        goal: usize,
    },

    #[error("cannot move {color:?} {from} -> {to}: {reason}")]
    InvalidRelocation {
        color: Color,
        from: Cell,
        to: Cell,
        reason: &'static str,
    },

    #[error("illegal move #{index}: {color:?} {from} -> {to}: {reason}")]
    IllegalMove {
        index: usize,
        color: Color,
        from: Cell,
        to: Cell,
        reason: &'static str,
    },

    #[error("heuristic weight must be a finite number >= 1, got {weight}")]
    InvalidWeight { weight: f64 },

    #[error("invalid board text: {message}")]
    InvalidBoardText { message: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PuzzleError>;
