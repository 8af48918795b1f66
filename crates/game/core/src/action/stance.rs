use crate::env::ItemEnv;
use crate::error::GuardRejection;
use crate::state::{ActorId, ItemState, Stance};

use super::{ActionTransition, ensure_holder};

/// Switch a stance archetype between drawn and sheathed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StanceAction {
    pub actor: ActorId,
    pub stance: Stance,
}

impl StanceAction {
    pub fn activate(actor: ActorId) -> Self {
        Self {
            actor,
            stance: Stance::Active,
        }
    }

    pub fn sheathe(actor: ActorId) -> Self {
        Self {
            actor,
            stance: Stance::Sheathed,
        }
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self.stance {
            Stance::Active => "activate",
            Stance::Sheathed => "sheathe",
        }
    }
}

impl ActionTransition for StanceAction {
    fn pre_validate(&self, state: &ItemState, env: &ItemEnv<'_>) -> Result<(), GuardRejection> {
        if !env.has_stance() {
            return Err(GuardRejection::NoStance);
        }
        ensure_holder(state, self.actor)
    }

    fn apply(&self, state: &mut ItemState, _env: &ItemEnv<'_>) {
        state.stance = Some(self.stance);
    }
}
