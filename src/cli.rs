//! Command-line interface for keypad_tictactoe.

use clap::Parser;
use keypad_tictactoe::{DisplayKind, InputKind};
use std::path::PathBuf;

/// Keypad Tic-Tac-Toe - two players, one 4x4 keypad, one small screen
#[derive(Parser, Debug)]
#[command(name = "keypad_tictactoe")]
#[command(about = "Tic-tac-toe driven by a 4x4 matrix keypad", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the device configuration file (defaults apply if missing)
    #[arg(short, long, default_value = "keypad_tictactoe.toml")]
    pub config: PathBuf,

    /// Where to show the game
    #[arg(long, value_enum, default_value_t = DisplayKind::Panel)]
    pub display: DisplayKind,

    /// Where key presses come from
    #[arg(long, value_enum, default_value_t = InputKind::Terminal)]
    pub input: InputKind,

    /// File receiving the log output
    #[arg(long, default_value = "keypad_tictactoe.log")]
    pub log_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["keypad_tictactoe"]).unwrap();
        assert_eq!(cli.display, DisplayKind::Panel);
        assert_eq!(cli.input, InputKind::Terminal);
        assert_eq!(cli.config, PathBuf::from("keypad_tictactoe.toml"));
    }

    #[test]
    fn test_explicit_sources() {
        let cli = Cli::try_parse_from([
            "keypad_tictactoe",
            "--display",
            "console",
            "--input",
            "gpio",
            "--config",
            "/etc/keypad.toml",
        ])
        .unwrap();
        assert_eq!(cli.display, DisplayKind::Console);
        assert_eq!(cli.input, InputKind::Gpio);
        assert_eq!(cli.config, PathBuf::from("/etc/keypad.toml"));
    }

    #[test]
    fn test_oled_display_selectable() {
        let cli = Cli::try_parse_from(["keypad_tictactoe", "--display", "oled"]).unwrap();
        assert_eq!(cli.display, DisplayKind::Oled);
    }

    #[test]
    fn test_unknown_display_rejected() {
        assert!(Cli::try_parse_from(["keypad_tictactoe", "--display", "lcd"]).is_err());
    }
}
