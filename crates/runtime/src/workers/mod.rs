//! Worker tasks that back the runtime orchestration.
//!
//! The session worker executes player commands and timer signals against the
//! single session it owns.

mod session;

pub use session::{Command, SessionWorker};
