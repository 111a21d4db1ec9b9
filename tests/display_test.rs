//! Display selection and the console fallback.

use keypad_tictactoe::{
    Board, ConsoleDisplay, DisplayKind, GameConfig, GameState, create_display_with_fallback,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Writer whose contents stay readable after the display takes it.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn config_with_bus(dir: &tempfile::TempDir) -> GameConfig {
    let path = dir.path().join("device.toml");
    let bus = dir.path().join("i2c-9");
    std::fs::write(&path, format!("i2c_bus = {:?}\n", bus.display().to_string())).unwrap();
    GameConfig::from_file(&path).unwrap()
}

#[tokio::test]
async fn test_unavailable_oled_falls_back_to_console() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_bus(&dir);
    let buffer = SharedBuffer::default();

    let mut display = create_display_with_fallback(
        DisplayKind::Oled,
        &config,
        ConsoleDisplay::new(buffer.clone()),
    );
    let game = GameState::new();
    display
        .render_idle_state(game.board(), &game.status_text())
        .await
        .unwrap();

    assert!(buffer.text().contains("Status: it is player X's turn"));
}

#[tokio::test]
async fn test_console_kind_uses_given_console() {
    let buffer = SharedBuffer::default();
    let mut display = create_display_with_fallback(
        DisplayKind::Console,
        &GameConfig::default(),
        ConsoleDisplay::new(buffer.clone()),
    );

    display.render_welcome_message().await.unwrap();
    display.render_idle_state(&Board::new(), "draw").await.unwrap();

    let text = buffer.text();
    assert!(text.contains("Welcome to Tic-Tac-Toe!"));
    assert!(text.contains("Status: draw"));
}
