//! Handlers for cross-instance reactions.
//!
//! Handlers react to [`CombatEvent`]s and produce dispatches for other
//! instances. The simulation worker runs them inside the command that
//! raised the event, so every reaction lands before the next command.

mod damage;
mod death;
mod release;

pub use damage::DamageRelayHandler;
pub use death::DeathHandler;
pub use release::ReleaseHandler;

use std::sync::Arc;

use async_trait::async_trait;

use game_core::{InstanceId, ItemAction};

use crate::events::CombatEvent;

/// Which records a reactive dispatch addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchTarget {
    Instance(InstanceId),
    /// Every instance; guards decide which ones care.
    All,
}

/// One action a handler wants applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub target: DispatchTarget,
    pub action: ItemAction,
}

impl Dispatch {
    pub fn to(instance: InstanceId, action: impl Into<ItemAction>) -> Self {
        Self {
            target: DispatchTarget::Instance(instance),
            action: action.into(),
        }
    }

    pub fn broadcast(action: impl Into<ItemAction>) -> Self {
        Self {
            target: DispatchTarget::All,
            action: action.into(),
        }
    }
}

/// Reacts to combat events with further dispatches.
#[async_trait]
pub trait ReactionHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower runs first.
    fn priority(&self) -> i32 {
        0
    }

    async fn react(&self, event: &CombatEvent) -> Vec<Dispatch>;
}

/// Ordered set of reaction handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn ReactionHandler>>,
}

impl HandlerRegistry {
    pub fn new(handlers: Vec<Arc<dyn ReactionHandler>>) -> Self {
        let mut registry = Self::default();
        for handler in handlers {
            registry.register(handler);
        }
        registry
    }

    pub fn register(&mut self, handler: Arc<dyn ReactionHandler>) {
        self.handlers.push(handler);
        self.handlers.sort_by_key(|handler| handler.priority());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ReactionHandler>> {
        self.handlers.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
