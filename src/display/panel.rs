//! Game rendering for a 128x64 monochrome panel.

use super::{DisplayError, Framebuffer, OutputSink};
use keypad_tictactoe_core::{Board, Coord, KEYPAD_LEGEND, Line, Player, Square};
use std::time::Duration;
use tracing::{debug, instrument};

/// Destination for finished frames (a panel controller or a preview).
pub trait FrameSink: Send {
    /// Shows `frame`.
    fn present(&mut self, frame: &Framebuffer) -> Result<(), DisplayError>;
}

/// Length and pacing of the win animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    /// Number of blink frames after the initial board.
    pub frames: usize,
    /// Pause after each blink frame.
    pub delay: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            frames: 5,
            delay: Duration::from_millis(300),
        }
    }
}

const HEADER_HEIGHT: i32 = 16;
const CELL: i32 = 15;
const GRID: i32 = CELL * 3;
const GRID_X: i32 = (Framebuffer::WIDTH - GRID) / 2;
const GRID_Y: i32 = 18;
const MARK_INSET: i32 = 3;
const O_RADIUS: i32 = 5;

/// Draws the game into frames and hands them to a [`FrameSink`].
pub struct PanelDisplay<S> {
    sink: S,
    animation: AnimationTiming,
}

impl<S: FrameSink> PanelDisplay<S> {
    /// Creates a renderer that presents frames on `sink`.
    pub fn new(sink: S, animation: AnimationTiming) -> Self {
        Self { sink, animation }
    }

    /// Borrows the frame sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn header(frame: &mut Framebuffer, text: &str) {
        frame.fill_rect(0, 0, Framebuffer::WIDTH, HEADER_HEIGHT, true);
        frame.draw_text_centered(4, &text.to_uppercase(), false);
    }

    fn grid(frame: &mut Framebuffer) {
        for i in 1..3 {
            let x = GRID_X + i * CELL;
            frame.draw_line((x, GRID_Y), (x, GRID_Y + GRID), 1, true);
            let y = GRID_Y + i * CELL;
            frame.draw_line((GRID_X, y), (GRID_X + GRID, y), 1, true);
        }
    }

    fn cell_origin(coord: Coord) -> (i32, i32) {
        (
            GRID_X + coord.col() as i32 * CELL,
            GRID_Y + coord.row() as i32 * CELL,
        )
    }

    fn cell_center(coord: Coord) -> (i32, i32) {
        let (x, y) = Self::cell_origin(coord);
        (x + CELL / 2, y + CELL / 2)
    }

    fn mark(frame: &mut Framebuffer, coord: Coord, player: Player) {
        let (x, y) = Self::cell_origin(coord);
        let (near, far) = (MARK_INSET, CELL - 1 - MARK_INSET);
        match player {
            Player::X => {
                frame.draw_line((x + near, y + near), (x + far, y + far), 1, true);
                frame.draw_line((x + far, y + near), (x + near, y + far), 1, true);
            }
            Player::O => frame.draw_circle(Self::cell_center(coord), O_RADIUS, true),
        }
    }

    /// Status bar, grid and marks; marks on `hidden` cells are skipped.
    fn game_frame(board: &Board, status: &str, hidden: &[Coord]) -> Framebuffer {
        let mut frame = Framebuffer::new();
        Self::header(&mut frame, status);
        Self::grid(&mut frame);
        for coord in Coord::ALL {
            if let Square::Occupied(player) = board.get(coord) {
                if !hidden.contains(&coord) {
                    Self::mark(&mut frame, coord, player);
                }
            }
        }
        frame
    }

    fn welcome_frame() -> Framebuffer {
        let mut frame = Framebuffer::new();
        Self::header(&mut frame, "Tic-Tac-Toe");
        let [reset, _, random, quit] = KEYPAD_LEGEND[3];
        let lines = [
            "1-9: PICK CELL".to_string(),
            format!("{reset}: NEW GAME"),
            format!("{random}: RANDOM MOVE"),
            format!("{quit}: QUIT"),
        ];
        for (i, text) in (0..).zip(lines) {
            frame.draw_text(5, 20 + i * 10, &text, true);
        }
        frame
    }
}

#[async_trait::async_trait]
impl<S: FrameSink> OutputSink for PanelDisplay<S> {
    async fn render_welcome_message(&mut self) -> Result<(), DisplayError> {
        self.sink.present(&Self::welcome_frame())
    }

    #[instrument(skip(self, board))]
    async fn render_idle_state(&mut self, board: &Board, status: &str) -> Result<(), DisplayError> {
        self.sink.present(&Self::game_frame(board, status, &[]))
    }

    #[instrument(skip(self, board))]
    async fn render_win_animation(
        &mut self,
        board: &Board,
        status: &str,
        line: &Line,
    ) -> Result<(), DisplayError> {
        self.sink.present(&Self::game_frame(board, status, &[]))?;

        let from = Self::cell_center(line[0]);
        let to = Self::cell_center(line[2]);
        for n in 0..self.animation.frames {
            let hidden: &[Coord] = if n % 2 == 0 { &[] } else { line };
            let mut frame = Self::game_frame(board, status, hidden);
            frame.draw_line(from, to, 2, true);
            self.sink.present(&frame)?;
            debug!(frame = n, "Win animation frame shown");
            tokio::time::sleep(self.animation.delay).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Frames(Vec<Framebuffer>);

    impl FrameSink for Frames {
        fn present(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
            self.0.push(frame.clone());
            Ok(())
        }
    }

    fn panel(frames: usize) -> PanelDisplay<Frames> {
        PanelDisplay::new(
            Frames::default(),
            AnimationTiming {
                frames,
                delay: Duration::ZERO,
            },
        )
    }

    fn won_board() -> (Board, Line) {
        let line = [
            Coord::new(0, 0).unwrap(),
            Coord::new(0, 1).unwrap(),
            Coord::new(0, 2).unwrap(),
        ];
        let mut board = Board::new();
        for coord in line {
            board.set(coord, Square::Occupied(Player::X));
        }
        board.set(Coord::new(1, 1).unwrap(), Square::Occupied(Player::O));
        (board, line)
    }

    #[test]
    fn test_grid_geometry() {
        assert_eq!(GRID_X, 41);
        assert_eq!(GRID_Y + GRID, 63);
    }

    #[tokio::test]
    async fn test_idle_frame_layout() {
        let mut display = panel(0);
        display.render_idle_state(&Board::new(), "draw").await.unwrap();

        let frame = &display.sink().0[0];
        // Header bar is lit at its corners, grid lines run at x = 56 and 71.
        assert!(frame.pixel(0, 0));
        assert!(frame.pixel(127, 15));
        assert!(frame.pixel(56, 30));
        assert!(frame.pixel(71, 50));
        assert!(frame.pixel(50, 33));
        // Empty cell interiors stay dark.
        assert!(!frame.pixel(48, 25));
    }

    #[tokio::test]
    async fn test_marks_are_drawn() {
        let mut board = Board::new();
        board.set(Coord::new(0, 0).unwrap(), Square::Occupied(Player::X));
        board.set(Coord::new(2, 2).unwrap(), Square::Occupied(Player::O));

        let mut display = panel(0);
        display.render_idle_state(&board, "x").await.unwrap();
        let frame = &display.sink().0[0];

        // X diagonal passes through its cell centre.
        assert!(frame.pixel(48, 25));
        // O circle: rightmost point of the circle around (78, 55).
        assert!(frame.pixel(83, 55));
        assert!(!frame.pixel(78, 55));
    }

    #[tokio::test]
    async fn test_win_animation_blinks_line() {
        let (board, line) = won_board();
        let mut display = panel(5);
        display
            .render_win_animation(&board, "player X wins", &line)
            .await
            .unwrap();

        let frames = &display.sink().0;
        assert_eq!(frames.len(), 6);
        // Winning marks hidden on odd blink frames only; the O stays put.
        let o_edge = (68, 40);
        for (n, frame) in frames.iter().skip(1).enumerate() {
            assert!(frame.pixel(o_edge.0, o_edge.1));
            let x_corner_visible = frame.pixel(44, 21);
            assert_eq!(x_corner_visible, n % 2 == 0, "frame {n}");
        }
        // The strike-through joins the outer cell centres.
        assert!(frames[1].pixel(48, 25) && frames[1].pixel(78, 25));
        assert!(frames[2].pixel(63, 25));
    }

    #[tokio::test]
    async fn test_welcome_frame_has_title_bar() {
        let mut display = panel(0);
        display.render_welcome_message().await.unwrap();
        let frame = &display.sink().0[0];
        assert!(frame.pixel(0, 0));
        assert!(frame.lit_count() > 128 * 16 / 2);
    }
}
