//! Depth-limited game tree search for the board game 'Connect 4'
//!
//! Three interchangeable agents pick a column for the player to move:
//! plain minimax, minimax with alpha-beta pruning, and expectimax against
//! a uniformly random opponent. All of them score positions with the same
//! static segment heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_search::{alphabeta, arrayboard::ArrayBoard, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three in a row along the bottom
//! let board = ArrayBoard::from_moves("112233")?;
//! let best_move = alphabeta(Player::One, &board, 3);
//!
//! assert_eq!(best_move, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod arrayboard;

pub mod evaluation;

pub mod successors;

pub mod search;

pub mod minimax;

pub mod alphabeta;

pub mod expectimax;

pub mod arena;

mod test;

pub use board::{Board, Cell, Player};
pub use evaluation::{evaluate, Evaluator, Score, SegmentHeuristic};
pub use search::{alphabeta, expectimax, minimax, Algorithm, Picker, Searcher, UniformPicker};

/// The width of the default game board in tiles
pub const WIDTH: usize = 7;

/// The height of the default game board in tiles
pub const HEIGHT: usize = 6;

// move strings use one digit per column
const_assert!(WIDTH <= 9);
// a board narrower or shorter than a four-in-a-row has no segments to score
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
