//! Rules of the picture/label matching game.
//!
//! `match-core` defines the canonical rules (difficulty policy, id sampling,
//! the round state machine and session bookkeeping) as pure APIs with no I/O
//! and no clock. Randomness is passed in by the caller, which keeps every rule
//! reproducible under a seeded generator. The runtime crate drives these types
//! from timers and user input.
pub mod config;
pub mod difficulty;
pub mod error;
pub mod sampler;
pub mod state;

pub use config::GameConfig;
pub use difficulty::{DifficultyPolicy, DifficultyTier, RoundConfig};
pub use error::{ErrorSeverity, GameError};
pub use sampler::{SamplingError, UniqueIdSampler};
pub use state::{
    BoardLayout, Item, ItemId, LabelLayout, LabelTile, MatchError, MatchOutcome, RoundError,
    RoundPhase, RoundState, SessionState, TimerOutcome,
};
