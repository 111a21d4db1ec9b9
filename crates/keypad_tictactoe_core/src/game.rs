//! Game state machine for tic-tac-toe.

use crate::action::{Move, MoveError};
use crate::rules::{check_winner, is_full};
use crate::types::{Board, Coord, Line, Player, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

/// Terminal or non-terminal classification of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win along `line`.
    Win {
        /// The player who completed the line.
        player: Player,
        /// The winning cells in scan order.
        line: Line,
    },
    /// Board is full and no line matched.
    Draw,
}

/// Complete state of one game session.
///
/// Mutated only through [`GameState::apply_move`],
/// [`GameState::apply_random_move`] and [`GameState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Player,
    outcome: Outcome,
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move (or the player who made the final move
    /// once the game is over).
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the game outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Accepted moves of the current game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True once the game has a winner or is drawn.
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Win { player, .. } => Some(player),
            _ => None,
        }
    }

    /// The winning line, if any.
    pub fn winning_line(&self) -> Option<Line> {
        match self.outcome {
            Outcome::Win { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// On success the outcome is re-evaluated and, unless the move ended
    /// the game, the turn passes to the opponent.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the state untouched when the game
    /// is over, the coordinate is off the board, or the cell is occupied.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn try_move(&mut self, row: usize, col: usize) -> Result<Outcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let coord = Coord::new(row, col).ok_or(MoveError::OutOfBounds { row, col })?;

        if !self.board.is_empty(coord) {
            return Err(MoveError::SquareOccupied(coord));
        }

        let player = self.turn;
        self.board.set(coord, Square::Occupied(player));
        self.history.push(Move::new(player, coord));

        self.outcome = self.evaluate();
        match self.outcome {
            Outcome::InProgress => self.turn = player.opponent(),
            Outcome::Win { player, line } => {
                info!(%player, ?line, "Game won");
            }
            Outcome::Draw => info!("Game drawn"),
        }

        debug!(%player, %coord, moves = self.history.len(), "Move applied");
        Ok(self.outcome)
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// Returns `true` for any accepted move, terminal or not, and `false`
    /// (with no change) for a rejected one.
    pub fn apply_move(&mut self, row: usize, col: usize) -> bool {
        match self.try_move(row, col) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Move rejected");
                false
            }
        }
    }

    /// Plays the current player's mark on a uniformly random empty cell,
    /// using the thread-local RNG.
    pub fn apply_random_move(&mut self) -> bool {
        self.apply_random_move_with(&mut rand::thread_rng())
    }

    /// Plays the current player's mark on a uniformly random empty cell.
    ///
    /// Returns `false` when the game is over or the board has no empty cell.
    #[instrument(skip_all)]
    pub fn apply_random_move_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_over() {
            return false;
        }

        let empty = self.board.empty_cells();
        let Some(&coord) = empty.choose(rng) else {
            debug!("No empty cell for a random move");
            return false;
        };

        debug!(%coord, "Random cell chosen");
        self.apply_move(coord.row(), coord.col())
    }

    /// Restores the initial configuration.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        *self = Self::new();
    }

    /// One-line description of the state for the status bar.
    pub fn status_text(&self) -> String {
        match self.outcome {
            Outcome::InProgress => format!("it is player {}'s turn", self.turn),
            Outcome::Win { player, .. } => format!("player {player} wins"),
            Outcome::Draw => "draw".to_string(),
        }
    }

    fn evaluate(&self) -> Outcome {
        if let Some((player, line)) = check_winner(&self.board) {
            Outcome::Win { player, line }
        } else if is_full(&self.board) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
