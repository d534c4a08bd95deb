//! Shared doubles for session integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast;

use match_core::{DifficultyTier, GameConfig, Item, ItemId};
use match_runtime::{
    CatalogError, Event, EventBus, InMemoryCatalog, ItemCatalog, Scheduler, SessionController,
    TimerHandle, TimerSignal, Topic,
};

/// A timer recorded by [`ManualScheduler`].
#[derive(Clone, Debug)]
pub struct Scheduled {
    pub signal: TimerSignal,
    pub every: Option<Duration>,
    pub after: Option<Duration>,
    cancelled: Arc<AtomicBool>,
}

impl Scheduled {
    pub fn is_armed(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }
}

/// Scheduler that only records timers; tests fire signals themselves.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Arc<Mutex<Vec<Scheduled>>>,
}

impl ManualScheduler {
    pub fn timers(&self) -> Vec<Scheduled> {
        self.timers.lock().unwrap().clone()
    }

    pub fn armed(&self) -> Vec<TimerSignal> {
        self.timers()
            .into_iter()
            .filter(Scheduled::is_armed)
            .map(|timer| timer.signal)
            .collect()
    }

    fn record(&self, signal: TimerSignal, every: Option<Duration>, after: Option<Duration>) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.timers.lock().unwrap().push(Scheduled {
            signal,
            every,
            after,
            cancelled: Arc::clone(&cancelled),
        });
        TimerHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, period: Duration, signal: TimerSignal) -> TimerHandle {
        self.record(signal, Some(period), None)
    }

    fn schedule_once(&self, delay: Duration, signal: TimerSignal) -> TimerHandle {
        self.record(signal, None, Some(delay))
    }
}

/// In-memory catalog whose lookups can be switched to fail.
#[derive(Clone)]
pub struct SwitchableCatalog {
    inner: InMemoryCatalog,
    failing: Arc<AtomicBool>,
}

impl SwitchableCatalog {
    pub fn new(count: u32) -> Self {
        Self {
            inner: InMemoryCatalog::generated(count),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemCatalog for SwitchableCatalog {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Network("catalog offline".into()));
        }
        self.inner.fetch_item(id).await
    }
}

pub const CATALOG_SIZE: u32 = 200;

pub struct Harness {
    pub controller: SessionController,
    pub scheduler: ManualScheduler,
    pub catalog: SwitchableCatalog,
    pub board: broadcast::Receiver<Event>,
    pub hud: broadcast::Receiver<Event>,
    pub outcome: broadcast::Receiver<Event>,
}

impl Harness {
    pub fn new(tier: DifficultyTier) -> Self {
        Self::with_config(tier, GameConfig::new().with_catalog_size(CATALOG_SIZE))
    }

    pub fn with_config(tier: DifficultyTier, config: GameConfig) -> Self {
        let scheduler = ManualScheduler::default();
        let catalog = SwitchableCatalog::new(CATALOG_SIZE);
        let events = EventBus::with_capacity(1024);

        let board = events.subscribe(Topic::Board);
        let hud = events.subscribe(Topic::Hud);
        let outcome = events.subscribe(Topic::Outcome);

        let controller = SessionController::new(
            config,
            tier,
            Arc::new(catalog.clone()),
            Arc::new(scheduler.clone()),
            events,
            StdRng::seed_from_u64(7),
        );

        Self {
            controller,
            scheduler,
            catalog,
            board,
            hud,
            outcome,
        }
    }

    /// Items of the active round.
    pub fn items(&self) -> Vec<Item> {
        self.controller
            .round()
            .expect("round should be active")
            .items()
            .to_vec()
    }

    /// Matches every item of the round with its own label.
    pub fn win_round(&mut self) {
        for item in self.items() {
            self.controller
                .attempt_match(item.id, &item.display_name)
                .expect("correct match should be accepted");
        }
    }

    /// Ticks until the countdown expires.
    pub fn expire_round(&mut self) {
        let seconds = self
            .controller
            .round()
            .expect("round should be active")
            .seconds_remaining();
        for _ in 0..seconds {
            self.controller.tick().expect("tick should succeed");
        }
    }
}

/// Every event currently buffered on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
