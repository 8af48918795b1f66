//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! every request an actor can make, plus snapshot queries and event
//! subscriptions.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    ActorId, ArchetypeConfig, EquipAction, InstanceId, ItemAction, ItemRecord, StanceAction,
    UnequipAction,
};

use super::collaborators::AimRay;
use super::errors::{Result, RuntimeError};
use super::outcome::{AttackOutcome, DispatchOutcome};
use crate::events::{Event, EventBus, InstanceSubscription, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Register a new instance. Its state starts unheld.
    pub async fn spawn(&self, config: ArchetypeConfig) -> Result<InstanceId> {
        self.request(|reply| Command::Spawn { config, reply })
            .await?
    }

    /// Apply an action to one instance.
    ///
    /// Guards are re-checked here no matter what the caller already checked;
    /// a refusal comes back as [`DispatchOutcome::Rejected`].
    pub async fn dispatch(
        &self,
        instance: InstanceId,
        action: impl Into<ItemAction>,
    ) -> Result<DispatchOutcome> {
        let action = action.into();
        self.request(|reply| Command::Dispatch {
            instance,
            action,
            reply,
        })
        .await?
    }

    pub async fn equip(&self, instance: InstanceId, actor: ActorId) -> Result<DispatchOutcome> {
        self.dispatch(instance, EquipAction::new(actor)).await
    }

    pub async fn unequip(&self, instance: InstanceId, actor: ActorId) -> Result<DispatchOutcome> {
        self.dispatch(instance, UnequipAction::new(actor)).await
    }

    pub async fn activate(&self, instance: InstanceId, actor: ActorId) -> Result<DispatchOutcome> {
        self.dispatch(instance, StanceAction::activate(actor)).await
    }

    pub async fn sheathe(&self, instance: InstanceId, actor: ActorId) -> Result<DispatchOutcome> {
        self.dispatch(instance, StanceAction::sheathe(actor)).await
    }

    /// Submit an attack intent. The runtime stamps the time itself.
    pub async fn attack(
        &self,
        instance: InstanceId,
        actor: ActorId,
        aim: AimRay,
    ) -> Result<AttackOutcome> {
        self.request(|reply| Command::Attack {
            instance,
            actor,
            aim,
            reply,
        })
        .await
    }

    /// Disconnect `actor`: every instance they hold is unequipped before
    /// this returns. Yields the number of instances released.
    pub async fn leave(&self, actor: ActorId) -> Result<usize> {
        self.request(|reply| Command::Leave { actor, reply }).await
    }

    /// Query the current record of one instance (read-only snapshot)
    pub async fn query(&self, instance: InstanceId) -> Result<ItemRecord> {
        self.request(|reply| Command::Query { instance, reply })
            .await?
            .ok_or(RuntimeError::UnknownInstance(instance))
    }

    /// Query every record, ordered by instance id.
    pub async fn query_all(&self) -> Result<Vec<ItemRecord>> {
        self.request(|reply| Command::QueryAll { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::State` - Snapshots after every effective dispatch
    /// - `Topic::Combat` - Held, fired, attack and death notifications
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Snapshots for a single instance.
    pub fn subscribe_instance(&self, instance: InstanceId) -> InstanceSubscription {
        InstanceSubscription::new(instance, self.event_bus.subscribe(Topic::State))
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
