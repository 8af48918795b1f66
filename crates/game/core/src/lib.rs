//! Deterministic rules for holdable combat items.
//!
//! `game-core` defines the canonical item state, the named actions that mutate
//! it, and the pure combat math shared by the authoritative runtime and any
//! offline tooling. All state mutation flows through [`engine::ItemEngine`],
//! which runs every action through the guard → apply → invariant pipeline.
//!
//! Nothing in this crate performs I/O or reads a clock. Time is supplied by the
//! caller as a monotonic [`Tick`] (milliseconds since the session started).
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    ActionTransition, DamageAction, EquipAction, HealAction, ItemAction, ReleaseAction,
    ResetDeathAction, StanceAction, UnequipAction,
};
pub use combat::{
    AttackRejection, AttackSession, HealthOutcome, Strike, apply_damage, apply_heal, ensure_armed,
    roll_damage,
};
pub use config::{Archetype, ArchetypeConfig, AssetRefs, StrikeStyle};
pub use engine::{ExecuteError, ExecutionOutcome, ItemEngine, TransitionPhase};
pub use env::{ItemEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ConfigError, GuardRejection, InvariantViolation};
pub use state::{
    ActorId, InstanceId, ItemChanges, ItemRecord, ItemState, MAX_HEALTH, Stance, StateDelta, Tick,
};
