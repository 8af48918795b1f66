//! Handler for holder death.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use game_core::ResetDeathAction;

use super::{Dispatch, ReactionHandler};
use crate::api::RespawnService;
use crate::events::CombatEvent;

/// Relays a death to the respawn service, then clears `dead_holder`.
///
/// A failed teleport (usually an actor who already left) is logged and the
/// death still counts as delivered. So is a teleport that outlives
/// `timeout`, since the worker waits on it.
pub struct DeathHandler {
    respawn: Arc<dyn RespawnService>,
    destination: String,
    timeout: Duration,
}

impl DeathHandler {
    pub fn new(
        respawn: Arc<dyn RespawnService>,
        destination: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            respawn,
            destination: destination.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ReactionHandler for DeathHandler {
    fn name(&self) -> &'static str {
        "death"
    }

    fn priority(&self) -> i32 {
        -50
    }

    async fn react(&self, event: &CombatEvent) -> Vec<Dispatch> {
        match event {
            CombatEvent::Death { instance, actor } => {
                let teleport = self.respawn.teleport(*actor, &self.destination);
                match tokio::time::timeout(self.timeout, teleport).await {
                    Ok(Ok(())) => {}
                    Ok(Err(error)) => {
                        tracing::warn!(
                            target: "runtime::handlers",
                            instance = %instance,
                            actor = %actor,
                            %error,
                            "respawn teleport failed"
                        );
                    }
                    Err(_) => {
                        tracing::warn!(
                            target: "runtime::handlers",
                            instance = %instance,
                            actor = %actor,
                            timeout_ms = self.timeout.as_millis() as u64,
                            "respawn teleport timed out"
                        );
                    }
                }
                vec![Dispatch::to(*instance, ResetDeathAction)]
            }
            _ => vec![],
        }
    }
}
