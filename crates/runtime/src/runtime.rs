//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/timer/event
//! channels, and exposes a builder-based API for clients to drive a session.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use match_core::{DifficultyTier, GameConfig};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::catalog::ItemCatalog;
use crate::events::{Event, EventBus, Topic};
use crate::scheduler::{TimerSignal, TokioScheduler};
use crate::session::SessionController;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub tier: DifficultyTier,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed RNG seed for reproducible sampling and shuffles.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            tier: DifficultyTier::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Main runtime that hosts one game session
///
/// Runtime owns the worker; [`SessionHandle`] provides a cloneable façade for
/// clients.
pub struct Runtime {
    handle: SessionHandle,
    session_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Subscribe to session events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.session_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<dyn ItemCatalog>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required item catalog
    pub fn catalog(mut self, catalog: impl ItemCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Set an already shared item catalog
    pub fn shared_catalog(mut self, catalog: Arc<dyn ItemCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Initial difficulty tier
    pub fn tier(mut self, tier: DifficultyTier) -> Self {
        self.config.tier = tier;
        self
    }

    /// Fixed RNG seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the runtime and spawn its worker. No round is started yet.
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (timer_tx, timer_rx) =
            mpsc::channel::<TimerSignal>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let controller = SessionController::new(
            self.config.game.clone(),
            self.config.tier,
            catalog,
            Arc::new(TokioScheduler::new(timer_tx)),
            event_bus.clone(),
            rng,
        );

        let handle = SessionHandle::new(command_tx, event_bus);

        let session_worker = SessionWorker::new(controller, command_rx, timer_rx);
        let session_worker_handle = tokio::spawn(async move {
            session_worker.run().await;
        });

        info!(
            target: "runtime::worker",
            tier = %self.config.tier,
            seeded = self.config.seed.is_some(),
            "Session runtime started"
        );

        Ok(Runtime {
            handle,
            session_worker_handle,
        })
    }
}
