//! Authoritative game state representation.
//!
//! [`RoundState`] is the state machine of a single round, [`SessionState`]
//! carries level, score and id bookkeeping across rounds, and the layout types
//! describe what is shown without influencing the rules.
mod item;
mod layout;
mod round;
mod session;

pub use item::{Item, ItemId};
pub use layout::{BoardLayout, LabelLayout, LabelTile};
pub use round::{MatchError, MatchOutcome, RoundError, RoundPhase, RoundState, TimerOutcome};
pub use session::SessionState;
