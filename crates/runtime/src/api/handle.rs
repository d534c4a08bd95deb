//! Cloneable façade for issuing commands to the runtime.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use match_core::{DifficultyTier, ItemId, MatchOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::scheduler::RoundId;
use crate::session::SessionSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start the round for the current level, or retry a failed setup
    pub async fn start_round(&self) -> Result<RoundId> {
        self.request(|reply| Command::StartRound { reply }).await?
    }

    /// Drop `item` onto the label reading `label`
    pub async fn attempt_match(
        &self,
        item: ItemId,
        label: impl Into<String>,
    ) -> Result<MatchOutcome> {
        let label = label.into();
        self.request(|reply| Command::AttemptMatch { item, label, reply })
            .await?
    }

    /// Switch difficulty; the session starts over at level 1 with score 0
    pub async fn change_difficulty(&self, tier: DifficultyTier) -> Result<RoundId> {
        self.request(|reply| Command::ChangeDifficulty { tier, reply })
            .await?
    }

    /// Start over at level 1 with score 0 after a lost round
    pub async fn restart(&self) -> Result<RoundId> {
        self.request(|reply| Command::Restart { reply }).await?
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Board` - Rendered board, label reshuffles, accepted matches
    /// - `Topic::Hud` - Score, level, countdown and incorrect-match feedback
    /// - `Topic::Outcome` - Round won, round lost, setup failures
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use match_runtime::Topic;
    ///
    /// let mut hud_rx = handle.subscribe(Topic::Hud);
    /// while let Ok(event) = hud_rx.recv().await {
    ///     // Update score, level and timer
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
