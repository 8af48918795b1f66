//! Damage, heal, and death reset.

use crate::combat::{HealthOutcome, apply_damage, apply_heal};
use crate::env::ItemEnv;
use crate::error::GuardRejection;
use crate::state::{ActorId, ItemState};

use super::{ActionTransition, ensure_holder};

/// Resolved hit against whoever holds this instance.
///
/// Relayed damage names the target actor; an instance the target no longer
/// holds (stale or duplicate delivery) rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageAction {
    pub holder: ActorId,
    pub amount: u32,
}

impl DamageAction {
    pub fn new(holder: ActorId, amount: u32) -> Self {
        Self { holder, amount }
    }
}

impl ActionTransition for DamageAction {
    fn pre_validate(&self, state: &ItemState, _env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        ensure_holder(state, self.holder)
    }

    fn apply(&self, state: &mut ItemState, _env: &ItemEnv<'_>) {
        let current = state.health.unwrap_or_default();
        match apply_damage(current, self.amount) {
            HealthOutcome::Alive(health) => state.health = Some(health),
            HealthOutcome::Depleted => {
                state.clear_holder();
                state.dead_holder = Some(self.holder);
            }
        }
    }
}

/// Regeneration tick. Carries the holder the timer was started for, so a
/// tick that outlives its holder is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealAction {
    pub holder: ActorId,
    pub amount: u32,
}

impl HealAction {
    pub fn new(holder: ActorId, amount: u32) -> Self {
        Self { holder, amount }
    }
}

impl ActionTransition for HealAction {
    fn pre_validate(&self, state: &ItemState, _env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        ensure_holder(state, self.holder)
    }

    fn apply(&self, state: &mut ItemState, _env: &ItemEnv<'_>) {
        if let Some(health) = state.health {
            state.health = Some(apply_heal(health, self.amount));
        }
    }
}

/// Clears `dead_holder` once the death has been relayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetDeathAction;

impl ActionTransition for ResetDeathAction {
    fn pre_validate(&self, state: &ItemState, _env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        if state.dead_holder.is_none() {
            return Err(GuardRejection::NoDeathPending);
        }
        Ok(())
    }

    fn apply(&self, state: &mut ItemState, _env: &ItemEnv<'_>) {
        state.dead_holder = None;
    }
}
