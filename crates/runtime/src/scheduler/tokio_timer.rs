use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use super::{Scheduler, TimerHandle, TimerSignal};

/// Start used when `now + period` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Scheduler backed by tokio timer tasks.
///
/// Each timer is its own task that forwards signals into the worker's timer
/// channel. Must be used from within a tokio runtime.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    signals: mpsc::Sender<TimerSignal>,
}

impl TokioScheduler {
    pub fn new(signals: mpsc::Sender<TimerSignal>) -> Self {
        Self { signals }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, signal: TimerSignal) -> TimerHandle {
        let signals = self.signals.clone();
        let task = tokio::spawn(async move {
            let now = Instant::now();
            let start = now.checked_add(period).unwrap_or(now + FAR_FUTURE);
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if signals.send(signal).await.is_err() {
                    trace!(target: "runtime::timer", signal = signal.as_str(), "receiver gone");
                    break;
                }
            }
        });
        TimerHandle::from_task(task)
    }

    fn schedule_once(&self, delay: Duration, signal: TimerSignal) -> TimerHandle {
        let signals = self.signals.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if signals.send(signal).await.is_err() {
                trace!(target: "runtime::timer", signal = signal.as_str(), "receiver gone");
            }
        });
        TimerHandle::from_task(task)
    }
}
