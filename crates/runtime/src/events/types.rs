//! Event types for different topics.

use match_core::{Item, ItemId, LabelLayout};
use serde::{Deserialize, Serialize};

use crate::scheduler::RoundId;

/// What the board shows: pictures, labels and matched pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A new round is on screen.
    BoardRendered {
        round: RoundId,
        items: Vec<Item>,
        /// Picture order.
        images: Vec<ItemId>,
        labels: LabelLayout,
    },

    /// Chaos reordered (and possibly flipped) the labels.
    LabelsReshuffled { round: RoundId, labels: LabelLayout },

    /// A picture was dropped on its own label and stays there.
    MatchAccepted {
        round: RoundId,
        item: ItemId,
        label: String,
    },
}

/// Heads-up display values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HudEvent {
    ScoreChanged { score: i64 },
    LevelChanged { level: u32 },
    TimerTicked { seconds_remaining: u32 },
    /// Wrong label; shown until the next accepted match.
    IncorrectMatch { item: ItemId, label: String },
}

/// Round outcomes and setup failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutcomeEvent {
    /// Next level starts after `advance_in_secs`.
    RoundWon {
        round: RoundId,
        level: u32,
        score: i64,
        advance_in_secs: u64,
    },

    /// Game over; the player may restart.
    RoundLost {
        round: RoundId,
        level: u32,
        score: i64,
    },

    /// The board could not be built. Session state is unchanged.
    RoundStartFailed { level: u32, error: String },
}
