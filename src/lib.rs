//! # Corners Solver Library
//!
//! This library solves the two-color "corners" puzzle: two equal blocks of
//! pieces start in opposite corners of a square board and must swap places
//! using single steps and chained jumps, in as few moves as possible.
//!
//! It is used by two binaries:
//! - `solve_corners`: builds a puzzle from command-line dimensions (or a board
//!   file, or a seeded scramble), runs the solver and prints the moves.
//! - `heuristic_evaluator`: compares the available heuristics on seeded
//!   scrambles.
//!
//! ## Modules
//! - `engine`: board representation (`Board`), colors, moves, the move
//!   generator, corner layouts and validated puzzles (`Puzzle`).
//! - `heuristics`: the Hungarian-method assignment bound and the simpler
//!   nearest-goal estimate.
//! - `solver`: weighted A* (`solve_astar`) and a breadth-first baseline
//!   (`solve_bfs`).
//! - `utils`: parsing boards from text and letter-number move notation.
//! - `error`: the crate error type.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use crate::error::{PuzzleError, Result};
