use std::collections::HashSet;

use crate::difficulty::{DifficultyPolicy, DifficultyTier, RoundConfig};

use super::item::ItemId;

/// Playthrough-wide state spanning many rounds.
///
/// The score is carried across levels; only a restart or a difficulty change
/// zeroes it. `used_ids` keeps ids from repeating until explicitly cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub level: u32,
    pub total_score: i64,
    pub tier: DifficultyTier,
    pub used_ids: HashSet<ItemId>,
}

impl SessionState {
    pub fn new(tier: DifficultyTier) -> Self {
        Self {
            level: 1,
            total_score: 0,
            tier,
            used_ids: HashSet::new(),
        }
    }

    /// Parameters of the round this session would start next.
    pub fn round_config(&self) -> RoundConfig {
        DifficultyPolicy::resolve(self.tier, self.level)
    }

    /// Adds a finished round's score delta to the carried total.
    pub fn fold_round_score(&mut self, delta: i64) {
        self.total_score += delta;
    }

    /// State for the next level: level + 1, used ids cleared, score kept.
    pub fn advanced(&self) -> Self {
        Self {
            level: self.level.saturating_add(1),
            total_score: self.total_score,
            tier: self.tier,
            used_ids: HashSet::new(),
        }
    }

    /// State after a restart: back to level 1 with a zero score.
    pub fn restarted(&self) -> Self {
        Self::new(self.tier)
    }

    /// State after picking another tier. Used ids are cleared as well.
    pub fn with_tier(&self, tier: DifficultyTier) -> Self {
        Self::new(tier)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DifficultyTier::default())
    }
}
