//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Coord, Line, Player, Square};
use tracing::instrument;

/// The 8 winning lines in scan order: rows top to bottom, columns left to
/// right, main diagonal, anti-diagonal.
pub const LINES: [Line; 8] = [
    // Rows
    [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
    [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
    [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
    // Columns
    [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
    [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
    [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
    // Diagonals
    [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
    [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)],
];

/// Checks if there is a winner on the board.
///
/// Returns the winning player together with the first uniformly marked
/// line in [`LINES`] order, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, Line)> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = *line;
        let sq = board.get(a);
        match sq {
            Square::Occupied(player) if sq == board.get(b) && sq == board.get(c) => {
                Some((player, *line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(board: &mut Board, player: Player, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            board.set(Coord::at(row, col), Square::Occupied(player));
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        mark(&mut board, Player::X, &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(check_winner(&board), Some((Player::X, LINES[0])));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        mark(&mut board, Player::O, &[(0, 2), (1, 1), (2, 0)]);
        let (player, line) = check_winner(&board).unwrap();
        assert_eq!(player, Player::O);
        assert_eq!(line, [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        mark(&mut board, Player::X, &[(0, 0), (0, 1)]);
        mark(&mut board, Player::O, &[(0, 2)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_rows_scanned_before_columns() {
        // Top row and left column both uniform: the row wins.
        let mut board = Board::new();
        mark(&mut board, Player::X, &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]);
        assert_eq!(check_winner(&board), Some((Player::X, LINES[0])));
    }

    #[test]
    fn test_earlier_row_wins_over_later_row() {
        let mut board = Board::new();
        mark(&mut board, Player::X, &[(1, 0), (1, 1), (1, 2)]);
        mark(&mut board, Player::O, &[(2, 0), (2, 1), (2, 2)]);
        assert_eq!(check_winner(&board), Some((Player::X, LINES[1])));
    }

    #[test]
    fn test_main_diagonal_before_anti_diagonal() {
        let mut board = Board::new();
        mark(&mut board, Player::O, &[(0, 0), (1, 1), (2, 2), (0, 2), (2, 0)]);
        assert_eq!(check_winner(&board), Some((Player::O, LINES[6])));
    }
}
