//! Authoritative runtime for holdable combat items.
//!
//! This crate wires the pure rules from `game-core` into a running session:
//! a single simulation worker owns every item record, serializes all
//! dispatches, runs the cross-instance reactions, and drives regeneration
//! timers. Consumers embed [`Runtime`] and talk to it through the cloneable
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`handlers`] turns combat events into further dispatches
//! - [`replication`] ships snapshots to observers and applies them there
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod handlers;
pub mod replication;
pub mod runtime;

mod workers;

pub use api::{
    AimRay, AttackOutcome, AttackReport, DispatchOutcome, HitReport, HitTarget, HitTest,
    LogRespawn, NoHitTest, RayHit, RespawnError, RespawnService, Result, RuntimeError,
    RuntimeHandle,
};
pub use events::{CombatEvent, Event, EventBus, InstanceSubscription, ItemStateEvent, Topic};
pub use handlers::{
    DamageRelayHandler, DeathHandler, Dispatch, DispatchTarget, HandlerRegistry,
    ReactionHandler, ReleaseHandler,
};
pub use replication::{ReplicationFrame, StateMirror};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
