//! Text fallback for machines without a panel.

use super::{DisplayError, OutputSink};
use keypad_tictactoe_core::{Board, Line};
use std::io::{self, Write};
use tracing::instrument;

/// Writes the game as plain text.
///
/// Lines end in `\r\n` so the output stays aligned when the terminal
/// keypad has put the terminal in raw mode.
pub struct ConsoleDisplay<W> {
    out: W,
}

impl ConsoleDisplay<io::Stdout> {
    /// Console output on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleDisplay<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}\r\n")
    }

    fn board(&mut self, board: &Board, status: &str) -> io::Result<()> {
        self.line("")?;
        self.line(&"=".repeat(30))?;
        self.line(&format!("Status: {status}"))?;
        self.line("Current board:")?;
        for row in board.rows() {
            let cells: Vec<String> = row.iter().map(|s| s.symbol().to_string()).collect();
            self.line(&cells.join(" | "))?;
            self.line(&"-".repeat(9))?;
        }
        self.line(&"=".repeat(30))
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> OutputSink for ConsoleDisplay<W> {
    async fn render_welcome_message(&mut self) -> Result<(), DisplayError> {
        let rule = "=".repeat(40);
        self.line(&rule)?;
        self.line("      Welcome to Tic-Tac-Toe!")?;
        self.line(&rule)?;
        self.line("Controls:")?;
        self.line("- 1-9: place a mark (rows 0-2, columns 0-2)")?;
        self.line("- *:   new game")?;
        self.line("- #:   random move")?;
        self.line("- D:   quit")?;
        self.line(&rule)?;
        self.out.flush()?;
        Ok(())
    }

    #[instrument(skip(self, board))]
    async fn render_idle_state(&mut self, board: &Board, status: &str) -> Result<(), DisplayError> {
        self.board(board, status)?;
        self.out.flush()?;
        Ok(())
    }

    #[instrument(skip(self, board))]
    async fn render_win_animation(
        &mut self,
        board: &Board,
        status: &str,
        line: &Line,
    ) -> Result<(), DisplayError> {
        self.board(board, status)?;
        let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
        self.line(&format!("Winning line: {}", cells.join(" ")))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keypad_tictactoe_core::{Coord, Player, Square};

    fn text(display: ConsoleDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[tokio::test]
    async fn test_board_dump_uses_blanks() {
        let mut board = Board::new();
        board.set(Coord::new(0, 0).unwrap(), Square::Occupied(Player::X));
        board.set(Coord::new(0, 1).unwrap(), Square::Occupied(Player::O));

        let mut display = ConsoleDisplay::new(Vec::new());
        display
            .render_idle_state(&board, "it is player X's turn")
            .await
            .unwrap();

        let out = text(display);
        assert!(out.contains("Status: it is player X's turn\r\n"));
        assert!(out.contains("X | O |  \r\n"));
        assert!(out.contains("  |   |  \r\n"));
        assert_eq!(out.matches("---------").count(), 3);
    }

    #[tokio::test]
    async fn test_win_lists_line() {
        let line = [
            Coord::new(0, 0).unwrap(),
            Coord::new(1, 1).unwrap(),
            Coord::new(2, 2).unwrap(),
        ];
        let mut display = ConsoleDisplay::new(Vec::new());
        display
            .render_win_animation(&Board::new(), "player O wins", &line)
            .await
            .unwrap();

        let out = text(display);
        assert!(out.contains("Status: player O wins"));
        assert!(out.contains("Winning line: (0, 0) (1, 1) (2, 2)"));
    }

    #[tokio::test]
    async fn test_welcome_lists_controls() {
        let mut display = ConsoleDisplay::new(Vec::new());
        display.render_welcome_message().await.unwrap();

        let out = text(display);
        assert!(out.contains("Welcome to Tic-Tac-Toe!"));
        assert!(out.contains("#:   random move"));
    }
}
