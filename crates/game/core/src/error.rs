//! Common error types for game-core.
//!
//! None of these are fatal. A [`GuardRejection`] turns a dispatch into a no-op,
//! an [`InvariantViolation`] discards the working copy of a record, and a
//! [`ConfigError`] refuses to spawn an instance with nonsensical parameters.

use crate::state::{ActorId, InstanceId, Stance};

/// Why an action handler refused to mutate state.
///
/// Guards are the only defense against stale or concurrent requests, so
/// every mutating action re-checks them against the current record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardRejection {
    /// The instance already has a holder.
    #[error("item already held by {holder}")]
    AlreadyHeld { holder: ActorId },

    /// A death was recorded and has not been relayed yet.
    #[error("death of {actor} has not been relayed yet")]
    DeathPending { actor: ActorId },

    /// The requester is not the current holder.
    #[error("{actor} is not the holder (holder: {holder:?})")]
    NotHolder {
        actor: ActorId,
        holder: Option<ActorId>,
    },

    /// The archetype has no stance to toggle.
    #[error("archetype has no stance")]
    NoStance,

    /// A `held` broadcast reached the instance that was just equipped.
    #[error("held broadcast originated from {instance} itself")]
    SameInstance { instance: InstanceId },

    /// `reset_death` arrived with no pending death.
    #[error("no pending death to reset")]
    NoDeathPending,
}

/// Post-validation failure: the record would break a data-model invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("health {health} present without a holder")]
    HealthWithoutHolder { health: u32 },

    #[error("holder {holder} has no health")]
    HolderWithoutHealth { holder: ActorId },

    #[error("held health {health} outside (0, 100]")]
    HealthOutOfRange { health: u32 },

    #[error("stance {stance} present without a holder")]
    StanceWithoutHolder { stance: Stance },

    #[error("stance {stance} set on an archetype without stances")]
    StanceNotSupported { stance: Stance },

    #[error("held stance archetype has no stance")]
    MissingStance,
}

/// Invalid archetype parameters.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_damage {min} exceeds max_damage {max}")]
    DamageRange { min: u32, max: u32 },

    #[error("attack_range must be a positive finite number (got {0})")]
    AttackRange(f32),

    #[error("archetype name must not be empty")]
    EmptyName,
}
