//! Traits for the external systems the runtime consults.
//!
//! Scene queries and actor relocation live outside this crate. The runtime
//! only needs a synchronous raycast and an asynchronous teleport, so hosts
//! plug in whatever physics or world service they have.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use game_core::ActorId;

/// Aim ray supplied with an attack intent.
///
/// Advisory only: the ray comes from the client, while the timing and the
/// damage roll are decided by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AimRay {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

impl AimRay {
    pub fn new(origin: [f32; 3], direction: [f32; 3]) -> Self {
        Self { origin, direction }
    }
}

/// What a raycast struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Actor(ActorId),
    Scenery,
}

/// Closest hit along an [`AimRay`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub target: HitTarget,
    pub distance: f32,
}

impl RayHit {
    pub fn actor(actor: ActorId, distance: f32) -> Self {
        Self {
            target: HitTarget::Actor(actor),
            distance,
        }
    }

    /// The struck actor, if the hit landed on one.
    pub fn actor_id(&self) -> Option<ActorId> {
        match self.target {
            HitTarget::Actor(actor) => Some(actor),
            HitTarget::Scenery => None,
        }
    }
}

/// Synchronous scene query made from inside the simulation worker.
pub trait HitTest: Send + Sync {
    fn raycast(&self, ray: &AimRay) -> Option<RayHit>;
}

/// Hit test for hosts without a scene: every ray misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHitTest;

impl HitTest for NoHitTest {
    fn raycast(&self, _ray: &AimRay) -> Option<RayHit> {
        None
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RespawnError {
    #[error("{0} is no longer in the world")]
    ActorGone(ActorId),

    #[error("respawn failed: {0}")]
    Failed(String),
}

/// Moves a dead actor to a respawn destination.
///
/// Called from inside the simulation worker, which waits for the result up
/// to `RuntimeConfig::respawn_timeout`. Implementations must not call back
/// into [`RuntimeHandle`](crate::RuntimeHandle): the worker cannot serve
/// that request until the teleport returns.
#[async_trait]
pub trait RespawnService: Send + Sync {
    async fn teleport(&self, actor: ActorId, destination: &str) -> Result<(), RespawnError>;
}

/// Respawn service that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRespawn;

#[async_trait]
impl RespawnService for LogRespawn {
    async fn teleport(&self, actor: ActorId, destination: &str) -> Result<(), RespawnError> {
        tracing::info!(target: "runtime::respawn", %actor, destination, "teleport");
        Ok(())
    }
}
