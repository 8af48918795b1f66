//! Event payloads published on the runtime bus.
use serde::{Deserialize, Serialize};

use game_core::{ActorId, InstanceId, ItemAction, ItemState, Strike};

/// Authoritative state snapshots, one per effective dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStateEvent {
    /// A new instance entered the session at its default state.
    Spawned {
        instance: InstanceId,
        archetype: String,
        state: ItemState,
    },
    /// A dispatch changed the record.
    Updated {
        instance: InstanceId,
        revision: u64,
        state: ItemState,
        cause: ItemAction,
    },
}

impl ItemStateEvent {
    pub fn instance(&self) -> InstanceId {
        match self {
            ItemStateEvent::Spawned { instance, .. } | ItemStateEvent::Updated { instance, .. } => {
                *instance
            }
        }
    }

    /// Spawned snapshots sit at revision zero.
    pub fn revision(&self) -> u64 {
        match self {
            ItemStateEvent::Spawned { .. } => 0,
            ItemStateEvent::Updated { revision, .. } => *revision,
        }
    }

    pub fn state(&self) -> &ItemState {
        match self {
            ItemStateEvent::Spawned { state, .. } | ItemStateEvent::Updated { state, .. } => state,
        }
    }
}

/// Cross-instance notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// `actor` just equipped `instance`; every other instance they hold lets go.
    Held { instance: InstanceId, actor: ActorId },
    /// An attack passed the rate check. Drives strike animation and audio.
    Fired {
        instance: InstanceId,
        attacker: ActorId,
        strike: Strike,
    },
    /// A fired attack landed on an actor.
    Attack {
        instance: InstanceId,
        attacker: ActorId,
        target: ActorId,
        damage: u32,
    },
    /// `actor` died while holding `instance`.
    Death { instance: InstanceId, actor: ActorId },
}

impl CombatEvent {
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            CombatEvent::Held { .. } => "held",
            CombatEvent::Fired { .. } => "fired",
            CombatEvent::Attack { .. } => "attack",
            CombatEvent::Death { .. } => "death",
        }
    }
}
