//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for hosts to plug in collaborators.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{
    HitTest, LogRespawn, NoHitTest, RespawnService, Result, RuntimeError, RuntimeHandle,
};
use crate::events::EventBus;
use crate::handlers::{
    DamageRelayHandler, DeathHandler, HandlerRegistry, ReactionHandler, ReleaseHandler,
};
use crate::workers::{Command, SimulationWorker, WorkerSetup};

const MIN_REGEN_PERIOD: Duration = Duration::from_millis(1);

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Period between regeneration ticks while an item is held.
    pub regen_period: Duration,
    /// Destination handed to the respawn service on death.
    pub respawn_destination: String,
    /// Longest the worker waits on one teleport before resetting the death
    /// anyway.
    pub respawn_timeout: Duration,
    /// Seed for damage rolls. `None` draws a random seed at build time.
    pub session_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 64,
            regen_period: Duration::from_secs(1),
            respawn_destination: "graveyard".to_owned(),
            respawn_timeout: Duration::from_secs(2),
            session_seed: None,
        }
    }
}

/// Main runtime that orchestrates the item simulation
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    session_seed: u64,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Seed used for every damage roll in this session.
    pub fn session_seed(&self) -> u64 {
        self.session_seed
    }

    /// Stop the worker, abort regeneration timers and wait for the worker
    /// to exit. Outstanding handles start failing with
    /// [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    hit_test: Option<Arc<dyn HitTest>>,
    respawn: Option<Arc<dyn RespawnService>>,
    extra_handlers: Vec<Arc<dyn ReactionHandler>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            hit_test: None,
            respawn: None,
            extra_handlers: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the damage seed (deterministic sessions, replays, tests).
    pub fn session_seed(mut self, seed: u64) -> Self {
        self.config.session_seed = Some(seed);
        self
    }

    /// Scene query used to resolve attack intents. Defaults to [`NoHitTest`].
    pub fn hit_test(mut self, hit_test: impl HitTest + 'static) -> Self {
        self.hit_test = Some(Arc::new(hit_test));
        self
    }

    /// Destination for dead holders. Defaults to [`LogRespawn`].
    pub fn respawn(mut self, respawn: impl RespawnService + 'static) -> Self {
        self.respawn = Some(Arc::new(respawn));
        self
    }

    /// Adds a reaction handler on top of the built-in release, damage relay
    /// and death handlers.
    pub fn with_handler(mut self, handler: impl ReactionHandler + 'static) -> Self {
        self.extra_handlers.push(Arc::new(handler));
        self
    }

    /// Build the runtime and start the simulation worker.
    pub fn build(self) -> Runtime {
        let session_seed = self.config.session_seed.unwrap_or_else(rand::random);
        let respawn = self
            .respawn
            .unwrap_or_else(|| Arc::new(LogRespawn) as Arc<dyn RespawnService>);
        let hit_test = self
            .hit_test
            .unwrap_or_else(|| Arc::new(NoHitTest) as Arc<dyn HitTest>);

        let mut handlers = HandlerRegistry::new(vec![
            Arc::new(ReleaseHandler) as Arc<dyn ReactionHandler>,
            Arc::new(DamageRelayHandler) as Arc<dyn ReactionHandler>,
            Arc::new(DeathHandler::new(
                respawn,
                self.config.respawn_destination.clone(),
                self.config.respawn_timeout,
            )) as Arc<dyn ReactionHandler>,
        ]);
        for handler in self.extra_handlers {
            handlers.register(handler);
        }

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx.clone(), event_bus.clone());

        let sim_worker = SimulationWorker::new(WorkerSetup {
            command_rx,
            command_tx: command_tx.downgrade(),
            event_bus,
            handlers,
            hit_test,
            // interval timers reject a zero period
            regen_period: self.config.regen_period.max(MIN_REGEN_PERIOD),
            session_seed,
        });

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        tracing::info!(target: "runtime", session_seed, "runtime started");

        Runtime {
            handle,
            session_seed,
            sim_worker_handle,
        }
    }
}
