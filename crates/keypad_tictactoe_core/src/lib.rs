//! Pure tic-tac-toe logic for the keypad tic-tac-toe device.
//!
//! This crate holds everything that does not touch hardware:
//!
//! - **GameState**: the 3x3 board, whose turn it is, and the outcome
//! - **Rules**: win and draw detection with a fixed line scan order
//! - **Keys**: the static mapping from 4x4 keypad keys to actions
//!
//! # Example
//!
//! ```
//! use keypad_tictactoe_core::{GameState, Player};
//!
//! let mut game = GameState::new();
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
//!     assert!(game.apply_move(row, col));
//! }
//!
//! assert_eq!(game.winner(), Some(Player::X));
//! assert_eq!(game.status_text(), "player X wins");
//! assert!(!game.apply_move(2, 2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod keys;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{GameState, Outcome};
pub use keys::{Action, KEYPAD_LEGEND, KeyCoord, map_key};
pub use types::{Board, Coord, Line, Player, Square};
