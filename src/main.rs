//! Keypad Tic-Tac-Toe - device entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use keypad_tictactoe::{Coordinator, ExitReason, GameConfig, create_display, open_input};
use std::path::Path;
use tracing::{info, instrument};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let reason = run(&cli).await?;

    println!("Game ended. Goodbye!");
    if let ExitReason::Failed(message) = &reason {
        eprintln!("Error: {message}");
    }
    Ok(())
}

/// Sends log output to `path`; the terminal belongs to the game.
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Brings up the devices and plays until the session ends.
///
/// Devices are dropped before returning so the terminal is restored before
/// anything else is printed.
#[instrument(skip(cli), fields(display = ?cli.display, input = ?cli.input))]
async fn run(cli: &Cli) -> Result<ExitReason> {
    info!("Starting Keypad Tic-Tac-Toe");

    let config = GameConfig::load(&cli.config)?;
    let output = create_display(cli.display, &config);
    let input = open_input(cli.input, &config).context("Failed to open keypad")?;

    let mut coordinator = Coordinator::new(input, output, config.timing());
    let reason = coordinator.run_session().await;
    drop(coordinator);

    info!(?reason, "Shut down");
    Ok(reason)
}
