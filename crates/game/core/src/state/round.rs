//! Round state machine.
//!
//! A round starts `Active` and ends exactly once, in `Won` or `Lost`. After
//! that every operation is a no-op, so late timer ticks or stray drops can
//! never rewrite the outcome.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::item::{Item, ItemId};

/// Lifecycle phase of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    #[default]
    Active,
    Won,
    Lost,
}

impl RoundPhase {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

/// Result of an accepted match attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchOutcome {
    Correct,
    Incorrect,
}

/// Result of a countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerOutcome {
    Continuing,
    Expired,
}

/// Errors raised while building a round.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundError {
    #[error("a round needs at least one item")]
    NoItems,

    #[error("item {0} appears more than once")]
    DuplicateItem(ItemId),

    #[error("round duration must be at least one second")]
    ZeroDuration,
}

impl GameError for RoundError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoItems => "ROUND_NO_ITEMS",
            Self::DuplicateItem(_) => "ROUND_DUPLICATE_ITEM",
            Self::ZeroDuration => "ROUND_ZERO_DURATION",
        }
    }
}

/// Match attempts rejected without touching the round.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchError {
    #[error("round is already {phase:?}")]
    RoundOver { phase: RoundPhase },

    #[error("item {0} is not part of this round")]
    UnknownItem(ItemId),

    #[error("item {0} is already matched")]
    AlreadyMatched(ItemId),
}

impl GameError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoundOver { .. } => "MATCH_ROUND_OVER",
            Self::UnknownItem(_) => "MATCH_UNKNOWN_ITEM",
            Self::AlreadyMatched(_) => "MATCH_ALREADY_MATCHED",
        }
    }
}

/// Authoritative state of one round.
///
/// `score` is the running delta earned in this round only; the session adds
/// it to its carried total.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    items: Vec<Item>,
    matched: HashSet<ItemId>,
    score: i64,
    seconds_remaining: u32,
    phase: RoundPhase,
}

impl RoundState {
    pub fn new(items: Vec<Item>, duration_secs: u32) -> Result<Self, RoundError> {
        if items.is_empty() {
            return Err(RoundError::NoItems);
        }
        if duration_secs == 0 {
            return Err(RoundError::ZeroDuration);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(RoundError::DuplicateItem(item.id));
            }
        }

        Ok(Self {
            items,
            matched: HashSet::new(),
            score: 0,
            seconds_remaining: duration_secs,
            phase: RoundPhase::Active,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Label texts in item order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.display_name.as_str())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn is_matched(&self, id: ItemId) -> bool {
        self.matched.contains(&id)
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Checks whether `item_id` was dropped on its own label.
    ///
    /// Correct: +10 and one more matched item, `Won` once every item is matched.
    /// Incorrect: -5, phase unchanged.
    pub fn attempt_match(
        &mut self,
        item_id: ItemId,
        target_label: &str,
    ) -> Result<MatchOutcome, MatchError> {
        if self.phase.is_terminal() {
            return Err(MatchError::RoundOver { phase: self.phase });
        }
        let item = self.item(item_id).ok_or(MatchError::UnknownItem(item_id))?;
        if self.matched.contains(&item_id) {
            return Err(MatchError::AlreadyMatched(item_id));
        }

        if item.display_name == target_label {
            self.matched.insert(item_id);
            self.score += GameConfig::MATCH_REWARD;
            if self.matched.len() == self.items.len() {
                self.phase = RoundPhase::Won;
            }
            Ok(MatchOutcome::Correct)
        } else {
            self.score -= GameConfig::MISMATCH_PENALTY;
            Ok(MatchOutcome::Incorrect)
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Reaching zero while `Active` loses the round. Once terminal, ticks
    /// change nothing and report `Expired`.
    pub fn tick(&mut self) -> TimerOutcome {
        if self.phase.is_terminal() {
            return TimerOutcome::Expired;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.phase = RoundPhase::Lost;
            TimerOutcome::Expired
        } else {
            TimerOutcome::Continuing
        }
    }
}
