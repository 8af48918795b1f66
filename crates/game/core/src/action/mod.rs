//! Named actions that mutate an item record.
//!
//! Every action is a small struct implementing [`ActionTransition`]. Guards
//! live in `pre_validate` and are re-checked on every dispatch, regardless of
//! whatever the requesting client already checked.
//!
//! - `ownership`: equip, unequip, and the `held` release
//! - `combat`: damage, heal, and the death reset
//! - `stance`: activate / sheathe for stance archetypes

mod combat;
mod ownership;
mod stance;

pub use combat::{DamageAction, HealAction, ResetDeathAction};
pub use ownership::{EquipAction, ReleaseAction, UnequipAction};
pub use stance::StanceAction;

use crate::env::ItemEnv;
use crate::error::{GuardRejection, InvariantViolation};
use crate::state::{ActorId, ItemState};

/// Defines how a concrete action mutates an item's state.
///
/// The engine drives the three hooks in order and commits the mutation only
/// when all of them succeed.
pub trait ActionTransition {
    /// Guard checks against the state **before** mutation.
    fn pre_validate(&self, _state: &ItemState, _env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        Ok(())
    }

    /// Mutates the state. Assumes `pre_validate` passed.
    fn apply(&self, state: &mut ItemState, env: &ItemEnv<'_>);

    /// Data-model invariants on the state **after** mutation.
    fn post_validate(
        &self,
        state: &ItemState,
        env: &ItemEnv<'_>,
    ) -> Result<(), InvariantViolation> {
        state.check_invariants(env.has_stance())
    }
}

/// Every action the store understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemAction {
    Equip(EquipAction),
    Unequip(UnequipAction),
    Release(ReleaseAction),
    Stance(StanceAction),
    Damage(DamageAction),
    Heal(HealAction),
    ResetDeath(ResetDeathAction),
}

impl ItemAction {
    /// The actor this action speaks for, if any.
    pub fn actor(&self) -> Option<ActorId> {
        match self {
            ItemAction::Equip(action) => Some(action.actor),
            ItemAction::Unequip(action) => Some(action.actor),
            ItemAction::Release(action) => Some(action.actor),
            ItemAction::Stance(action) => Some(action.actor),
            ItemAction::Damage(action) => Some(action.holder),
            ItemAction::Heal(action) => Some(action.holder),
            ItemAction::ResetDeath(_) => None,
        }
    }

    /// The snake_case action name, used in logs and event payloads.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            ItemAction::Equip(_) => "equip",
            ItemAction::Unequip(_) => "unequip",
            ItemAction::Release(_) => "release",
            ItemAction::Stance(action) => action.as_snake_case(),
            ItemAction::Damage(_) => "damage",
            ItemAction::Heal(_) => "heal",
            ItemAction::ResetDeath(_) => "reset_death",
        }
    }

    pub(crate) fn transition(&self) -> &dyn ActionTransition {
        match self {
            ItemAction::Equip(action) => action,
            ItemAction::Unequip(action) => action,
            ItemAction::Release(action) => action,
            ItemAction::Stance(action) => action,
            ItemAction::Damage(action) => action,
            ItemAction::Heal(action) => action,
            ItemAction::ResetDeath(action) => action,
        }
    }
}

impl From<EquipAction> for ItemAction {
    fn from(action: EquipAction) -> Self {
        Self::Equip(action)
    }
}

impl From<UnequipAction> for ItemAction {
    fn from(action: UnequipAction) -> Self {
        Self::Unequip(action)
    }
}

impl From<ReleaseAction> for ItemAction {
    fn from(action: ReleaseAction) -> Self {
        Self::Release(action)
    }
}

impl From<StanceAction> for ItemAction {
    fn from(action: StanceAction) -> Self {
        Self::Stance(action)
    }
}

impl From<DamageAction> for ItemAction {
    fn from(action: DamageAction) -> Self {
        Self::Damage(action)
    }
}

impl From<HealAction> for ItemAction {
    fn from(action: HealAction) -> Self {
        Self::Heal(action)
    }
}

impl From<ResetDeathAction> for ItemAction {
    fn from(action: ResetDeathAction) -> Self {
        Self::ResetDeath(action)
    }
}

/// Shared holder guard used by every holder-scoped action.
pub(crate) fn ensure_holder(state: &ItemState, actor: ActorId) -> Result<(), GuardRejection> {
    if state.is_held_by(actor) {
        Ok(())
    } else {
        Err(GuardRejection::NotHolder {
            actor,
            holder: state.holder,
        })
    }
}
