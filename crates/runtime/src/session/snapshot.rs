use serde::{Deserialize, Serialize};

use match_core::{BoardLayout, DifficultyTier, RoundPhase};

use crate::scheduler::RoundId;

/// Where the session currently is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Nothing started yet.
    #[default]
    Idle,
    /// A round is being played.
    Playing,
    /// Round won, waiting for the next level to start.
    AwaitingAdvance,
    /// Round lost, waiting for a restart.
    GameOver,
    /// The last round setup failed; retry with `start_round`.
    SetupFailed,
}

/// Read model of the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub id: RoundId,
    pub phase: RoundPhase,
    pub matched_count: usize,
    pub item_count: usize,
    pub seconds_remaining: u32,
    /// Score earned in this round only.
    pub round_score: i64,
    pub board: BoardLayout,
}

/// Read model of the whole session, as shown to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level: u32,
    /// Live score: carried total plus the active round's running delta.
    pub score: i64,
    pub tier: DifficultyTier,
    pub status: SessionStatus,
    pub round: Option<RoundSnapshot>,
}
