//! Polling loop that connects the keypad, the game and the display.

use crate::display::{DisplayError, OutputSink};
use crate::keypad::{KeySource, KeypadError};
use anyhow::Result;
use keypad_tictactoe_core::{Action, GameState, Outcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

/// Delays of the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long the welcome message stays up.
    pub welcome_delay: Duration,
    /// Minimum time between two keypad polls. Must be non-zero.
    pub poll_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            welcome_delay: Duration::from_secs(2),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The quit key was pressed.
    Quit,
    /// Ctrl+C, either as a signal or from the terminal keypad.
    Interrupted,
    /// The loop hit an unexpected fault.
    Failed(String),
}

/// Owns one game and drives it from key presses.
pub struct Coordinator {
    game: GameState,
    input: Box<dyn KeySource>,
    output: Box<dyn OutputSink>,
    timing: Timing,
    rng: StdRng,
}

impl Coordinator {
    /// Creates a coordinator with a fresh game.
    pub fn new(input: Box<dyn KeySource>, output: Box<dyn OutputSink>, timing: Timing) -> Self {
        Self {
            game: GameState::new(),
            input,
            output,
            timing,
            rng: StdRng::from_entropy(),
        }
    }

    /// Uses a seeded RNG for random moves, making games reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Runs a whole session: welcome screen, initial board, polling loop.
    ///
    /// Never fails; faults are logged and reported as
    /// [`ExitReason::Failed`]. The input source is released on every path.
    #[instrument(skip(self))]
    pub async fn run_session(&mut self) -> ExitReason {
        let outcome = tokio::select! {
            result = self.start_and_run() => result,
            Ok(()) = tokio::signal::ctrl_c() => {
                info!("Interrupt signal received");
                Ok(ExitReason::Interrupted)
            }
        };

        let reason = outcome.unwrap_or_else(|e| {
            error!(error = %e, "Game loop failed");
            ExitReason::Failed(e.to_string())
        });

        self.input.release();
        info!(?reason, "Session finished");
        reason
    }

    async fn start_and_run(&mut self) -> Result<ExitReason> {
        self.output.render_welcome_message().await?;
        tokio::time::sleep(self.timing.welcome_delay).await;
        self.render().await?;
        self.run().await
    }

    /// Polls the keypad until the quit key, an interrupt or an error.
    pub async fn run(&mut self) -> Result<ExitReason> {
        info!(interval = ?self.timing.poll_interval, "Entering polling loop");
        let mut ticker = tokio::time::interval(self.timing.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let ControlFlow::Break(reason) = self.poll_once().await? {
                return Ok(reason);
            }
        }
    }

    /// Reads one key and applies it.
    pub async fn poll_once(&mut self) -> Result<ControlFlow<ExitReason>> {
        let key = match self.input.read_key().await {
            Ok(Some(key)) => key,
            Ok(None) => return Ok(ControlFlow::Continue(())),
            Err(KeypadError::Interrupted) => return Ok(ControlFlow::Break(ExitReason::Interrupted)),
            Err(e) => return Err(e.into()),
        };

        let action = key.action();
        debug!(%key, ?action, "Key mapped");
        Ok(self.handle_action(action).await?)
    }

    /// Applies one action to the game and re-renders if it changed.
    #[instrument(skip(self))]
    pub async fn handle_action(
        &mut self,
        action: Action,
    ) -> Result<ControlFlow<ExitReason>, DisplayError> {
        let changed = match action {
            Action::PlaceMark(coord) => {
                !self.game.is_over() && self.game.apply_move(coord.row(), coord.col())
            }
            Action::RandomMove => {
                !self.game.is_over() && self.game.apply_random_move_with(&mut self.rng)
            }
            Action::Reset => {
                self.game.reset();
                true
            }
            Action::Quit => {
                info!("Quit key pressed");
                return Ok(ControlFlow::Break(ExitReason::Quit));
            }
            Action::Ignored => false,
        };

        if changed {
            self.render().await?;
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn render(&mut self) -> Result<(), DisplayError> {
        let status = self.game.status_text();
        match self.game.outcome() {
            Outcome::Win { line, .. } => {
                self.output
                    .render_win_animation(self.game.board(), &status, &line)
                    .await
            }
            Outcome::InProgress | Outcome::Draw => {
                self.output.render_idle_state(self.game.board(), &status).await
            }
        }
    }
}
