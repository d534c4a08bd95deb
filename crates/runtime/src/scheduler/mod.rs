//! Timers driving a round: countdown, chaos reshuffle and level advance.
//!
//! A [`Scheduler`] turns a period or delay into [`TimerSignal`]s delivered to
//! the session worker. Every signal carries the [`RoundId`] it was scheduled
//! for, and every schedule call returns a [`TimerHandle`] that stops the timer
//! when cancelled or dropped.
mod tokio_timer;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

pub use tokio_timer::TokioScheduler;

/// Monotonic identifier of a started round within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round-{}", self.0)
    }
}

/// Deferred work requested by the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSignal {
    /// One countdown second elapsed.
    CountdownTick(RoundId),
    /// Time to perturb the label layout.
    ChaosReshuffle(RoundId),
    /// Win pause is over, start the next level.
    LevelAdvance(RoundId),
}

impl TimerSignal {
    pub fn round(&self) -> RoundId {
        match *self {
            Self::CountdownTick(round) | Self::ChaosReshuffle(round) | Self::LevelAdvance(round) => {
                round
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountdownTick(_) => "countdown_tick",
            Self::ChaosReshuffle(_) => "chaos_reshuffle",
            Self::LevelAdvance(_) => "level_advance",
        }
    }
}

/// Source of timer signals.
pub trait Scheduler: Send + Sync {
    /// Emits `signal` every `period`, first after one full period.
    fn schedule_repeating(&self, period: Duration, signal: TimerSignal) -> TimerHandle;

    /// Emits `signal` once after `delay`.
    fn schedule_once(&self, delay: Duration, signal: TimerSignal) -> TimerHandle;
}

/// Cancellation handle of a scheduled timer.
///
/// Cancelling takes effect immediately; dropping the handle cancels too.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle that aborts a spawned timer task.
    pub fn from_task(task: JoinHandle<()>) -> Self {
        Self::new(move || task.abort())
    }

    pub fn cancel(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}
