use crate::error::InvariantViolation;

use super::common::{ActorId, InstanceId};

/// Health a holder receives on equip, and the regeneration ceiling.
pub const MAX_HEALTH: u32 = 100;

/// Carry stance for archetypes that can be sheathed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Stance {
    /// Drawn and ready to strike.
    Active,
    /// Stowed on the holder; attacks are refused.
    Sheathed,
}

/// Replicated state of one item instance.
///
/// The default value is the unheld (mounted) state every instance starts in
/// and returns to whenever its holder becomes invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    /// Actor currently possessing the item.
    pub holder: Option<ActorId>,
    /// Holder health in `(0, MAX_HEALTH]`; present iff `holder` is set.
    pub health: Option<u32>,
    /// Carry stance; only set for stance archetypes while held.
    pub stance: Option<Stance>,
    /// Actor whose death has been recorded but not yet relayed.
    pub dead_holder: Option<ActorId>,
}

impl ItemState {
    /// Unheld state with no pending death.
    pub const fn unheld() -> Self {
        Self {
            holder: None,
            health: None,
            stance: None,
            dead_holder: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.holder.is_some()
    }

    pub fn is_held_by(&self, actor: ActorId) -> bool {
        self.holder == Some(actor)
    }

    /// Clears holder, health and stance. `dead_holder` is left untouched.
    pub fn clear_holder(&mut self) {
        self.holder = None;
        self.health = None;
        self.stance = None;
    }

    /// Checks the data-model invariants.
    ///
    /// `has_stance` is whether the owning archetype supports a stance at all.
    pub fn check_invariants(&self, has_stance: bool) -> Result<(), InvariantViolation> {
        match (self.holder, self.health) {
            (None, Some(health)) => return Err(InvariantViolation::HealthWithoutHolder { health }),
            (Some(holder), None) => return Err(InvariantViolation::HolderWithoutHealth { holder }),
            (Some(_), Some(health)) if health == 0 || health > MAX_HEALTH => {
                return Err(InvariantViolation::HealthOutOfRange { health });
            }
            _ => {}
        }

        match (self.holder, self.stance) {
            (None, Some(stance)) => Err(InvariantViolation::StanceWithoutHolder { stance }),
            (Some(_), Some(stance)) if !has_stance => {
                Err(InvariantViolation::StanceNotSupported { stance })
            }
            (Some(_), None) if has_stance => Err(InvariantViolation::MissingStance),
            _ => Ok(()),
        }
    }
}

/// Authoritative record for one instance: its state plus a revision counter.
///
/// `revision` increases by one for every dispatch that changed at least one
/// field. Observers compare revisions to discard stale snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub instance: InstanceId,
    pub state: ItemState,
    pub revision: u64,
}

impl ItemRecord {
    /// Fresh record at the unheld default.
    pub fn new(instance: InstanceId) -> Self {
        Self {
            instance,
            state: ItemState::unheld(),
            revision: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(health: u32, stance: Option<Stance>) -> ItemState {
        ItemState {
            holder: Some(ActorId(1)),
            health: Some(health),
            stance,
            dead_holder: None,
        }
    }

    #[test]
    fn default_state_is_unheld_and_valid() {
        let state = ItemState::default();
        assert_eq!(state, ItemState::unheld());
        assert!(state.check_invariants(true).is_ok());
        assert!(state.check_invariants(false).is_ok());
    }

    #[test]
    fn health_without_holder_is_rejected() {
        let state = ItemState {
            health: Some(50),
            ..ItemState::default()
        };
        assert_eq!(
            state.check_invariants(false),
            Err(InvariantViolation::HealthWithoutHolder { health: 50 })
        );
    }

    #[test]
    fn held_health_must_stay_in_range() {
        assert!(held(100, None).check_invariants(false).is_ok());
        assert_eq!(
            held(0, None).check_invariants(false),
            Err(InvariantViolation::HealthOutOfRange { health: 0 })
        );
        assert_eq!(
            held(101, None).check_invariants(false),
            Err(InvariantViolation::HealthOutOfRange { health: 101 })
        );
    }

    #[test]
    fn stance_follows_archetype_support() {
        assert!(held(80, Some(Stance::Active)).check_invariants(true).is_ok());
        assert_eq!(
            held(80, None).check_invariants(true),
            Err(InvariantViolation::MissingStance)
        );
        assert_eq!(
            held(80, Some(Stance::Sheathed)).check_invariants(false),
            Err(InvariantViolation::StanceNotSupported {
                stance: Stance::Sheathed
            })
        );
    }

    #[test]
    fn clear_holder_keeps_pending_death() {
        let mut state = held(10, None);
        state.dead_holder = Some(ActorId(9));
        state.clear_holder();
        assert_eq!(state.holder, None);
        assert_eq!(state.health, None);
        assert_eq!(state.dead_holder, Some(ActorId(9)));
    }
}
