//! Authoritative item state representation.
//!
//! This module owns the per-instance record that the runtime replicates to
//! observers. Runtime layers clone or query this state but mutate it
//! exclusively through the engine.
pub mod delta;
pub mod types;

pub use delta::{ItemChanges, StateDelta};
pub use types::{ActorId, InstanceId, ItemRecord, ItemState, MAX_HEALTH, Stance, Tick};
