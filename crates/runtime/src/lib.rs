//! Runtime orchestration for the matching game session.
//!
//! This crate wires together the item catalog boundary, round timers, the
//! session controller, and the worker task into a cohesive runtime API.
//! Consumers embed [`Runtime`] to drive a session, subscribe to events, and
//! forward player input through [`SessionHandle`] or [`DragDropInput`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`session`] owns round lifecycle and level progression
//! - [`scheduler`] provides cancellable countdown, chaos and advance timers
//! - [`catalog`] resolves sampled ids into displayable items
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod catalog;
pub mod events;
pub mod runtime;
pub mod scheduler;
pub mod session;

mod workers;

pub use api::{DragDropInput, Result, RuntimeError, SessionHandle};
pub use catalog::{CatalogError, InMemoryCatalog, ItemCatalog};
pub use events::{BoardEvent, Event, EventBus, HudEvent, OutcomeEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::{RoundId, Scheduler, TimerHandle, TimerSignal, TokioScheduler};
pub use session::{RoundSnapshot, SessionController, SessionSnapshot, SessionStatus};
