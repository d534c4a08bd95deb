//! Topic-based event bus for the presentation boundary.
//!
//! The session publishes what changed; renderers subscribe only to the topics
//! they draw (board, heads-up display, round outcome).

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BoardEvent, HudEvent, OutcomeEvent};
