//! Session worker that owns the authoritative [`SessionController`].
//!
//! Receives commands from [`crate::api::SessionHandle`] and timer signals from
//! the scheduler, handling them strictly one at a time.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use match_core::{DifficultyTier, GameError, ItemId, MatchOutcome};

use crate::api::Result;
use crate::scheduler::{RoundId, TimerSignal};
use crate::session::{SessionController, SessionSnapshot};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Start (or retry) the round for the current session.
    StartRound {
        reply: oneshot::Sender<Result<RoundId>>,
    },
    /// Drop a picture onto a label.
    AttemptMatch {
        item: ItemId,
        label: String,
        reply: oneshot::Sender<Result<MatchOutcome>>,
    },
    /// Switch tier and start over at level 1.
    ChangeDifficulty {
        tier: DifficultyTier,
        reply: oneshot::Sender<Result<RoundId>>,
    },
    /// Start over at level 1 with the current tier.
    Restart {
        reply: oneshot::Sender<Result<RoundId>>,
    },
    /// Query the session read model.
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that processes session commands and timer signals.
pub struct SessionWorker {
    controller: SessionController,
    command_rx: mpsc::Receiver<Command>,
    timer_rx: mpsc::Receiver<TimerSignal>,
}

impl SessionWorker {
    pub fn new(
        controller: SessionController,
        command_rx: mpsc::Receiver<Command>,
        timer_rx: mpsc::Receiver<TimerSignal>,
    ) -> Self {
        Self {
            controller,
            command_rx,
            timer_rx,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(signal) = self.timer_rx.recv() => {
                    self.handle_timer(signal).await;
                }
            }
        }

        self.controller.teardown();
        debug!(target: "runtime::worker", "Session worker stopped");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::StartRound { reply } => {
                let result = self.controller.start_round().await;
                let _ = reply.send(result);
            }
            Command::AttemptMatch { item, label, reply } => {
                let result = self.controller.attempt_match(item, &label);
                if let Err(error) = &result {
                    debug!(
                        target: "runtime::worker",
                        %item,
                        label = %label,
                        code = error.error_code(),
                        "Match rejected"
                    );
                }
                let _ = reply.send(result);
            }
            Command::ChangeDifficulty { tier, reply } => {
                let result = self.controller.on_difficulty_changed(tier).await;
                let _ = reply.send(result);
            }
            Command::Restart { reply } => {
                let result = self.controller.on_restart().await;
                let _ = reply.send(result);
            }
            Command::QuerySnapshot { reply } => {
                let _ = reply.send(self.controller.snapshot());
            }
        }
    }

    async fn handle_timer(&mut self, signal: TimerSignal) {
        if let Err(error) = self.controller.on_timer(signal).await {
            warn!(
                target: "runtime::worker",
                signal = signal.as_str(),
                round = %signal.round(),
                code = error.error_code(),
                error = %error,
                "Timer signal handling failed"
            );
        }
    }
}
