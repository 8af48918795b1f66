//! Equip, unequip, and cross-instance release.

use crate::env::ItemEnv;
use crate::error::GuardRejection;
use crate::state::{ActorId, InstanceId, ItemState, MAX_HEALTH, Stance};

use super::{ActionTransition, ensure_holder};

/// Take possession of an unheld instance.
///
/// Two actors racing for the same instance are ordered by the store; the
/// second dispatch finds a holder and is rejected here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub actor: ActorId,
}

impl EquipAction {
    pub fn new(actor: ActorId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for EquipAction {
    fn pre_validate(&self, state: &ItemState, _env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        if let Some(holder) = state.holder {
            return Err(GuardRejection::AlreadyHeld { holder });
        }
        if let Some(actor) = state.dead_holder {
            return Err(GuardRejection::DeathPending { actor });
        }
        Ok(())
    }

    fn apply(&self, state: &mut ItemState, env: &ItemEnv<'_>) {
        state.holder = Some(self.actor);
        state.health = Some(MAX_HEALTH);
        state.stance = env.has_stance().then_some(Stance::Active);
    }
}

/// Voluntary drop, also issued for every instance when an actor leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnequipAction {
    pub actor: ActorId,
}

impl UnequipAction {
    pub fn new(actor: ActorId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for UnequipAction {
    fn pre_validate(&self, state: &ItemState, _env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        ensure_holder(state, self.actor)
    }

    fn apply(&self, state: &mut ItemState, _env: &ItemEnv<'_>) {
        state.clear_holder();
    }
}

/// Reaction to a `held` broadcast: `actor` just equipped `held`, so every
/// other instance they hold lets go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseAction {
    pub actor: ActorId,
    pub held: InstanceId,
}

impl ReleaseAction {
    pub fn new(actor: ActorId, held: InstanceId) -> Self {
        Self { actor, held }
    }
}

impl ActionTransition for ReleaseAction {
    fn pre_validate(&self, state: &ItemState, env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        if env.instance() == self.held {
            return Err(GuardRejection::SameInstance {
                instance: self.held,
            });
        }
        ensure_holder(state, self.actor)
    }

    fn apply(&self, state: &mut ItemState, _env: &ItemEnv<'_>) {
        state.clear_holder();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchetypeConfig;

    const ALICE: ActorId = ActorId(1);
    const BOB: ActorId = ActorId(2);

    fn held_by(actor: ActorId) -> ItemState {
        ItemState {
            holder: Some(actor),
            health: Some(70),
            stance: None,
            dead_holder: None,
        }
    }

    #[test]
    fn equip_sets_full_health() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(1), &config);
        let mut state = ItemState::default();

        let action = EquipAction::new(ALICE);
        action.pre_validate(&state, &env).unwrap();
        action.apply(&mut state, &env);
        action.post_validate(&state, &env).unwrap();

        assert_eq!(state.holder, Some(ALICE));
        assert_eq!(state.health, Some(MAX_HEALTH));
        assert_eq!(state.stance, None);
    }

    #[test]
    fn equip_activates_stance_archetypes() {
        let config = ArchetypeConfig::sword();
        let env = ItemEnv::new(InstanceId(1), &config);
        let mut state = ItemState::default();

        EquipAction::new(ALICE).apply(&mut state, &env);

        assert_eq!(state.stance, Some(Stance::Active));
        assert!(state.check_invariants(true).is_ok());
    }

    #[test]
    fn second_equip_loses_the_race() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(1), &config);
        let state = held_by(ALICE);

        assert_eq!(
            EquipAction::new(BOB).pre_validate(&state, &env),
            Err(GuardRejection::AlreadyHeld { holder: ALICE })
        );
    }

    #[test]
    fn equip_waits_for_death_relay() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(1), &config);
        let state = ItemState {
            dead_holder: Some(ALICE),
            ..ItemState::default()
        };

        assert_eq!(
            EquipAction::new(BOB).pre_validate(&state, &env),
            Err(GuardRejection::DeathPending { actor: ALICE })
        );
    }

    #[test]
    fn unequip_by_non_holder_is_rejected() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(1), &config);
        let state = held_by(ALICE);

        assert_eq!(
            UnequipAction::new(BOB).pre_validate(&state, &env),
            Err(GuardRejection::NotHolder {
                actor: BOB,
                holder: Some(ALICE)
            })
        );
    }

    #[test]
    fn release_ignores_the_originating_instance() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(4), &config);
        let state = held_by(ALICE);

        assert_eq!(
            ReleaseAction::new(ALICE, InstanceId(4)).pre_validate(&state, &env),
            Err(GuardRejection::SameInstance {
                instance: InstanceId(4)
            })
        );
    }

    #[test]
    fn release_clears_other_instances_held_by_actor() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(2), &config);
        let mut state = held_by(ALICE);

        let action = ReleaseAction::new(ALICE, InstanceId(4));
        action.pre_validate(&state, &env).unwrap();
        action.apply(&mut state, &env);

        assert_eq!(state, ItemState::default());
    }

    #[test]
    fn release_leaves_other_holders_alone() {
        let config = ArchetypeConfig::gun();
        let env = ItemEnv::new(InstanceId(2), &config);
        let state = held_by(BOB);

        assert!(
            ReleaseAction::new(ALICE, InstanceId(4))
                .pre_validate(&state, &env)
                .is_err()
        );
    }
}
