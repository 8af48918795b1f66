//! Handler that turns a landed attack into damage.

use async_trait::async_trait;

use game_core::DamageAction;

use super::{Dispatch, ReactionHandler};
use crate::events::CombatEvent;

/// Relays `attack` to the target's item.
///
/// The target may hold any instance (or none), so the damage goes to all of
/// them and the holder guard picks the right record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamageRelayHandler;

#[async_trait]
impl ReactionHandler for DamageRelayHandler {
    fn name(&self) -> &'static str {
        "damage_relay"
    }

    async fn react(&self, event: &CombatEvent) -> Vec<Dispatch> {
        match event {
            CombatEvent::Attack { target, damage, .. } => {
                vec![Dispatch::broadcast(DamageAction::new(*target, *damage))]
            }
            _ => vec![],
        }
    }
}
