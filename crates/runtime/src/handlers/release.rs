//! Handler for the `held` broadcast.

use async_trait::async_trait;

use game_core::ReleaseAction;

use super::{Dispatch, ReactionHandler};
use crate::events::CombatEvent;

/// Releases every other instance held by an actor who just equipped one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseHandler;

#[async_trait]
impl ReactionHandler for ReleaseHandler {
    fn name(&self) -> &'static str {
        "release"
    }

    fn priority(&self) -> i32 {
        -100
    }

    async fn react(&self, event: &CombatEvent) -> Vec<Dispatch> {
        match event {
            CombatEvent::Held { instance, actor } => {
                vec![Dispatch::broadcast(ReleaseAction::new(*actor, *instance))]
            }
            _ => vec![],
        }
    }
}
