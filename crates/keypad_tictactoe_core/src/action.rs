//! Moves and move rejection reasons.

use crate::types::{Coord, Player};

/// A player placing their mark at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{player} -> {coord}")]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The cell where the mark is placed.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, coord: Coord) -> Self {
        Self { player, coord }
    }
}

/// Why a move was rejected. A rejected move never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has a winner or ended in a draw.
    #[display("Game is already over")]
    GameOver,

    /// The coordinate lies outside the 3x3 grid.
    #[display("Cell ({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The cell already holds a mark.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(Coord),
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        let mv = Move::new(Player::O, Coord::at(2, 1));
        assert_eq!(mv.to_string(), "O -> (2, 1)");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(MoveError::GameOver.to_string(), "Game is already over");
        assert_eq!(
            MoveError::SquareOccupied(Coord::at(0, 2)).to_string(),
            "Square (0, 2) is already occupied"
        );
    }
}
