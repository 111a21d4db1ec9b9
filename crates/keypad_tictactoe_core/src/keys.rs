//! Mapping from physical keypad keys to game actions.
//!
//! The keypad is a 4x4 membrane matrix. The upper-left 3x3 block mirrors
//! the board; the bottom row carries the meta keys:
//!
//! ```text
//! 1 2 3 A
//! 4 5 6 B
//! 7 8 9 C
//! * 0 # D
//! ```

use crate::types::Coord;
use derive_more::Display;

/// Printed labels of the 4x4 keypad, indexed `[row][col]`.
pub const KEYPAD_LEGEND: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// A physical key position on the keypad matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("key ({row}, {col})")]
pub struct KeyCoord {
    /// Matrix row (driven line).
    pub row: usize,
    /// Matrix column (sensed line).
    pub col: usize,
}

impl KeyCoord {
    /// Creates a key coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Finds the key carrying `label`, ignoring ASCII case.
    pub fn from_label(label: char) -> Option<Self> {
        let label = label.to_ascii_uppercase();
        KEYPAD_LEGEND.iter().enumerate().find_map(|(row, keys)| {
            keys.iter()
                .position(|&k| k == label)
                .map(|col| Self::new(row, col))
        })
    }

    /// The printed label of this key, if it exists on the keypad.
    pub fn label(self) -> Option<char> {
        KEYPAD_LEGEND.get(self.row)?.get(self.col).copied()
    }

    /// The action this key triggers.
    pub fn action(self) -> Action {
        map_key(self.row, self.col)
    }
}

/// Semantic action produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place the current player's mark.
    PlaceMark(Coord),
    /// Start a new game.
    Reset,
    /// Play a random move for the current player.
    RandomMove,
    /// Leave the program.
    Quit,
    /// Unassigned key; the coordinator drops it.
    Ignored,
}

/// Maps a physical key to its action.
///
/// Rows and columns 0-2 place a mark on the matching cell. Row 3 holds the
/// meta keys: column 0 resets, column 2 plays a random move, column 3
/// quits. Everything else, including row 3 column 1 and coordinates past
/// the matrix, is [`Action::Ignored`].
pub fn map_key(row: usize, col: usize) -> Action {
    match (row, col) {
        (3, 0) => Action::Reset,
        (3, 2) => Action::RandomMove,
        (3, 3) => Action::Quit,
        _ => Coord::new(row, col).map_or(Action::Ignored, Action::PlaceMark),
    }
}
